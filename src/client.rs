mod checkout_client;
mod email_client;

pub use checkout_client::{CheckoutClient, CheckoutSession};
pub use email_client::{Email, EmailClient, EmailSender, MessageId};
