use std::process::ExitCode;

fn main() -> ExitCode {
    let matches = qp_cli::command().get_matches();
    qp_cli::init_tracing(matches.get_flag("verbose"));

    let mut stdout = std::io::stdout().lock();
    match qp_cli::run(&matches, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
