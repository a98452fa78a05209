//! Interaction layer of TaxAlert: reqwest clients for the three external
//! services, speaking their exact wire contracts.

mod answer_client;
mod email_client;
mod inference_client;

pub use answer_client::AnswerClient;
pub use email_client::EmailClient;
pub use inference_client::InferenceClient;
