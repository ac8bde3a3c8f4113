//! Domain Models

pub mod admin_notification;
pub mod announcement;
pub mod customer;
pub mod inquiry;
pub mod notification;
pub mod point_history;

pub use admin_notification::{AdminNotification, AdminNotificationSource};
pub use announcement::{Announcement, AnnouncementCreate, AnnouncementUpdate};
pub use customer::{
    Customer, CustomerCreate, CustomerStatus, CustomerUpdate, SignupRequest,
};
pub use inquiry::{Inquiry, InquiryCreate, InquiryKind};
pub use notification::{Notification, NotificationType};
pub use point_history::{PointEntryType, PointHistory};
