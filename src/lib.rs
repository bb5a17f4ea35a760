//! Push notifications for order lifecycle changes.
//!
//! Each Lambda binary in this crate is bound to the DynamoDB stream of the
//! orders table. Records are routed by [`handlers::process_event`] to one of
//! the order handlers, which resolve the recipient through a
//! [`common::store::RecordStore`] and deliver through a
//! [`common::dispatcher::NotificationDispatcher`].

pub mod common;
pub mod handlers;
