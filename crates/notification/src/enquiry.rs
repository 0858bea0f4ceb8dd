use gurudev_enquiry::{Command, EnquirySubmitted};
use tokio::{sync::mpsc::UnboundedReceiver, task::JoinHandle};

use crate::{SendEmail, template::Template};

#[derive(askama::Template)]
#[template(path = "enquiry.html")]
pub struct EnquiryHtmlTemplate<'a> {
    pub enquiry: &'a EnquirySubmitted,
    pub received_at: String,
}

#[derive(askama::Template)]
#[template(path = "enquiry.txt")]
pub struct EnquiryPlainTemplate<'a> {
    pub enquiry: &'a EnquirySubmitted,
    pub received_at: String,
}

/// Forwards every stored enquiry to `to` and marks it forwarded.
///
/// The task ends once every sender of the channel is dropped. `command` only marks rows
/// forwarded and must be built without a subscriber, otherwise it keeps its own channel open.
pub fn subscribe_enquiry<M: SendEmail>(
    mut receiver: UnboundedReceiver<EnquirySubmitted>,
    mailer: M,
    command: Command,
    to: String,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tracing::info!("Enquiry subscriber started");

        while let Some(event) = receiver.recv().await {
            if let Err(err) = handle_enquiry_submitted(&mailer, &command, &to, &event).await {
                tracing::error!(enquiry.id = %event.id, "Failed to forward enquiry: {err}");
            }
        }

        tracing::info!("Enquiry subscriber stopped");
    })
}

#[tracing::instrument(skip_all, fields(enquiry.id = %event.id))]
async fn handle_enquiry_submitted<M: SendEmail>(
    mailer: &M,
    command: &Command,
    to: &str,
    event: &EnquirySubmitted,
) -> anyhow::Result<()> {
    let template = Template;
    let received_at = gurudev_shared::format_timestamp(event.created_at);

    let html = template.to_string(EnquiryHtmlTemplate {
        enquiry: event,
        received_at: received_at.to_owned(),
    });

    let plain = template.to_string(EnquiryPlainTemplate {
        enquiry: event,
        received_at,
    });

    mailer
        .send(to, &format!("New enquiry from {}", event.name), html, plain)
        .await?;

    command.mark_forwarded(&event.id).await?;

    Ok(())
}
