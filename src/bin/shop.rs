//! Demonstration driver: a handful of concurrent simulated clients, each
//! reviewing a random product in a random locale and writing a report. The
//! catalog itself does no scheduling; the workers here are the callers.

use std::path::Path;
use std::thread;

use log::error;
use rand::Rng;

use stockroom::{Catalog, CatalogConfig, Rating};

const CLIENTS: usize = 5;

fn main() {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => CatalogConfig::from_file(Path::new(&path)),
        None => CatalogConfig::default(),
    };
    let catalog = Catalog::new(config);
    catalog.load_all();

    let mut handles = Vec::with_capacity(CLIENTS);
    for client_number in 1..=CLIENTS {
        let catalog = catalog.clone();
        handles.push(thread::spawn(move || client_log(&catalog, client_number)));
    }
    for handle in handles {
        match handle.join() {
            Ok(log) => println!("{}", log),
            Err(_) => error!("client thread panicked"),
        }
    }
}

fn client_log(catalog: &Catalog, client_number: usize) -> String {
    let client_id = format!("Client {}", client_number);
    let mut rng = rand::thread_rng();
    let product_id = rng.gen_range(101..110);
    let tags = Catalog::supported_locales();
    let tag = tags[rng.gen_range(0..tags.len())];

    let mut log = String::new();
    log.push_str(&format!("{}\n-\tstart of log\t-\n", client_id));
    for (stars, discount) in catalog.get_discounts(tag) {
        log.push_str(&format!("{}\t{}\n", stars, discount));
    }
    match catalog.review_product(product_id, Rating::ThreeStar, "Yet another review") {
        Some(_) => log.push_str(&format!("Product {} reviewed\n", product_id)),
        None => log.push_str(&format!("Product {} not reviewed\n", product_id)),
    }
    catalog.print_product_report(product_id, tag, &client_id);
    log.push_str(&format!(
        "{} generated report for {} product\n-\tend of log\t-",
        client_id, product_id
    ));
    log
}
