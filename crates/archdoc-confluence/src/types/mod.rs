//! Confluence API types.

mod attachment;
mod page;
mod space;

pub use attachment::{Attachment, AttachmentExtensions, AttachmentsResponse};
pub use page::{ContentSearchResponse, PageInfo, Version};
pub use space::SpacesResponse;
