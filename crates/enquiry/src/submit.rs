use std::sync::Arc;

use crate::EnquiryInput;

/// The collaborator that persists or forwards a validated enquiry.
///
/// Returns the id of the stored enquiry. Every error is reported to the visitor as the
/// same generic failure notice.
#[async_trait::async_trait]
pub trait SubmitEnquiry: Send + Sync {
    async fn submit(&self, input: &EnquiryInput) -> gurudev_shared::Result<String>;
}

#[async_trait::async_trait]
impl<T: SubmitEnquiry + ?Sized> SubmitEnquiry for Arc<T> {
    async fn submit(&self, input: &EnquiryInput) -> gurudev_shared::Result<String> {
        (**self).submit(input).await
    }
}
