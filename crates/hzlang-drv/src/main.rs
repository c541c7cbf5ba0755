use std::process::ExitCode;

fn main() -> ExitCode {
    let config = match hzlang_drv::parse_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("出错了: {e}");
            return ExitCode::from(1);
        }
    };

    if let Err(e) = hzlang_drv::run(config) {
        eprintln!("出错了: {e}");
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}
