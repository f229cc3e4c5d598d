pub mod bootstrap;
pub mod config;
pub mod db;
pub mod labels;
pub mod pipeline;
pub mod remediation;
pub mod vocabulary;

pub use bootstrap::{load_advisor, BootstrapError};
pub use pipeline::{AdviceOutcome, SymptomAdvisor};
pub use remediation::{parse_list, AnswerBundle};

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. `RUST_LOG` wins over the default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();
}
