pub mod config;
pub mod init;
pub mod predictor;

pub use config::ModelConfig;
pub use init::ParamInit;
pub use predictor::Predictor;
