use std::error::Error;
use store_ip_whitelist::cli::CliArgs;
use store_ip_whitelist::load_whitelist;
use store_ip_whitelist::output::{print_check, print_whitelist, whitelist_summary_json};

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    log4rs::init_file("log4rs.yml", Default::default())
        .map_err(|e| format!("Error initializing log4rs: {e}"))?;
    log::info!("#Start main()");

    let args = CliArgs::parse(std::env::args().skip(1))?;
    let whitelist = load_whitelist(args.config_file.as_deref())?;

    if args.json {
        println!("{}", whitelist_summary_json(&whitelist)?);
    } else {
        print_whitelist(&whitelist);
    }

    for ip in &args.ips {
        print_check(&whitelist, ip);
    }

    Ok(())
}
