use clap::Parser;
use mjml_mailer::app::{self, CommandOutput};
use mjml_mailer::utils::logger;
use mjml_mailer::{CliConfig, MailerError};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::debug!("Running {:?} command", config.command);

    match app::run(&config).await {
        Ok(output) => {
            report(&output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::debug!("{:?} failed: {:?}", config.command, e);

            match &e {
                MailerError::InvalidRecipients { .. } => println!("{}", e),
                _ => eprintln!("Error: {}", e),
            }

            // Only terminal errors change the exit status.
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn report(output: &CommandOutput) {
    let rendered = output.render();
    if !rendered.is_empty() {
        println!("{}", rendered);
    }
}
