use ecr_cleanup::cli::{Args, Runner};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let mut runner = Runner::new(Args::parse_args());

    match runner.run().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            runner.output().error(&err.to_string());
            if err.is_configuration() {
                runner
                    .output()
                    .error("no registry calls were made; fix the configuration and retry");
            }
            ExitCode::FAILURE
        }
    }
}
