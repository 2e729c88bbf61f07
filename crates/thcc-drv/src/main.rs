use std::process::exit;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match thcc_drv::run_cli(&args) {
        Ok(code) => exit(code),
        Err(e) => {
            eprintln!("error: {}", e);
            exit(1);
        },
    }
}
