//! Product Similarity Example
//!
//! Walks through the three structures of an `Oxirec` instance:
//! - ratings in the interaction matrix
//! - per-user sessions
//! - nearest-product lookup over feature vectors
//!
//! Run with `cargo run --example product_similarity -- --target 2 3 --json`.

use anyhow::{bail, Result};
use clap::Parser;
use oxirec::{Config, Oxirec, Product};
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(about = "Find the product closest to a target feature vector")]
struct Args {
    /// Target feature vector, one value per configured feature dimension
    /// (defaults to `2 3`, zero-padded or truncated to the dimension)
    #[arg(long, num_args = 1.., allow_negative_numbers = true)]
    target: Option<Vec<f64>>,

    /// Print the results as JSON
    #[arg(long)]
    json: bool,

    /// Optional TOML configuration file
    #[arg(long)]
    config: Option<std::path::PathBuf>,
}

/// Resizes a demo feature vector to `dimension`, padding with zeros.
fn fit_to_dimension(mut features: Vec<f64>, dimension: usize) -> Vec<f64> {
    features.resize(dimension, 0.0);
    features
}

/// Picks the query vector: the default one fitted to `dimension`, or the
/// user's, which must already have `dimension` values.
fn resolve_target(target: Option<Vec<f64>>, dimension: usize) -> Result<Vec<f64>> {
    match target {
        None => Ok(fit_to_dimension(vec![2.0, 3.0], dimension)),
        Some(target) if target.len() == dimension => Ok(target),
        Some(target) => bail!(
            "--target has {} values but the configured feature_dimension is {}",
            target.len(),
            dimension
        ),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::builder().feature_dimension(2).max_users(5).max_products(5).build()?,
    };
    let dimension = config.feature_dimension;
    let target = resolve_target(args.target, dimension)?;
    let mut oxirec = Oxirec::new(config)?;

    oxirec.rate(0, 0, 5.0)?;
    oxirec.rate(1, 2, 3.0)?;

    oxirec.record_interaction(0, 101u64);
    oxirec.record_interaction(0, 102u64);
    oxirec.record_interaction(1, 103u64);

    let catalog = [
        Product::new(201u64, "Trail shoe", fit_to_dimension(vec![1.0, 2.0], dimension))
            .with_category("shoes"),
        Product::new(202u64, "Rain jacket", fit_to_dimension(vec![3.0, 4.0], dimension))
            .with_category("outerwear"),
        Product::new(203u64, "Wool hat", fit_to_dimension(vec![5.0, 6.0], dimension)),
    ];
    for product in catalog {
        oxirec.register_product(product)?;
    }

    let user_ratings = oxirec.matrix().get_user_ratings(0)?;
    let session = oxirec.sessions_mut().get_user_session(0);
    let similar = oxirec.catalog().find_similar_product(&target)?;
    tracing::info!(target_vector = ?target, found = similar.is_some(), "similarity lookup done");

    if args.json {
        let report = json!({
            "user_0_ratings": user_ratings,
            "user_0_session": session,
            "target": target,
            "most_similar": similar,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("User 0 ratings: {user_ratings:?}");
    let session: Vec<String> = session.iter().map(ToString::to_string).collect();
    println!("User 0 session: [{}]", session.join(", "));
    match similar {
        Some(product) => println!(
            "Most similar product to {:?}: {} ({})",
            target, product.id, product.name
        ),
        None => println!("No product found near {:?}", target),
    }

    Ok(())
}
