pub mod person_client;

pub use person_client::PersonClient;
