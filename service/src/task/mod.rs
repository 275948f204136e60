//! Background [`Task`]s definitions.

mod background;
pub mod mark_overdue_invoices;

pub use common::Handler as Task;

pub use self::{
    background::Background, mark_overdue_invoices::MarkOverdueInvoices,
};
