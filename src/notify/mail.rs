use super::render::{render_csv, render_html};
use super::{Digest, Notifier};
use crate::config::MailConfig;
use crate::errors::{AppError, AppResult};
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

/// Sends digests over SMTP (STARTTLS): HTML body plus a CSV attachment.
pub struct SmtpNotifier {
    transport: SmtpTransport,
    from: Mailbox,
    to: Vec<Mailbox>,
}

fn parse_mailbox(raw: &str) -> AppResult<Mailbox> {
    raw.parse::<Mailbox>()
        .map_err(|e| AppError::Config(format!("invalid mail address '{raw}': {e}")))
}

impl SmtpNotifier {
    pub fn new(cfg: &MailConfig) -> AppResult<Self> {
        if cfg.to.is_empty() {
            return Err(AppError::Config("mail.to needs at least one recipient".into()));
        }

        let from = parse_mailbox(&cfg.from)?;
        let to = cfg
            .to
            .iter()
            .map(|r| parse_mailbox(r))
            .collect::<AppResult<Vec<_>>>()?;

        let mut builder = SmtpTransport::starttls_relay(&cfg.smtp_host)
            .map_err(|e| AppError::Config(format!("invalid SMTP relay '{}': {e}", cfg.smtp_host)))?
            .port(cfg.smtp_port);

        if let Some(password) = cfg.resolved_password() {
            builder = builder.credentials(Credentials::new(cfg.username.clone(), password));
        }

        Ok(Self {
            transport: builder.build(),
            from,
            to,
        })
    }

    fn build_message(&self, digest: &Digest) -> AppResult<Message> {
        let csv = render_csv(digest)?;
        let csv_type = ContentType::parse("text/csv")
            .map_err(|e| AppError::Mail(format!("content type: {e}")))?;

        let body = MultiPart::mixed()
            .singlepart(SinglePart::html(render_html(digest)))
            .singlepart(Attachment::new(digest.attachment_name()).body(csv, csv_type));

        let mut builder = Message::builder()
            .from(self.from.clone())
            .subject(digest.subject());
        for rcpt in &self.to {
            builder = builder.to(rcpt.clone());
        }

        builder
            .multipart(body)
            .map_err(|e| AppError::Mail(e.to_string()))
    }
}

impl Notifier for SmtpNotifier {
    fn send(&self, digest: &Digest) -> AppResult<()> {
        let message = self.build_message(digest)?;
        self.transport
            .send(&message)
            .map_err(|e| AppError::Mail(e.to_string()))?;
        tracing::info!(
            line = %digest.line,
            day = %digest.day,
            recipients = self.to.len(),
            "digest mailed"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "smtp"
    }
}
