use std::error::Error;

use chrono::NaiveDate;
use clap::Parser;
use wayflags::ev::{Direction, Registry};
use wayflags::osm::{Options, PriorityCode, Profile, Tags, WayParser};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("unknown profile {0:?} (expected foot, bike or car)")]
    UnknownProfile(String),

    #[error("malformed tag {0:?} (expected key=value)")]
    MalformedTag(String),
}

/// Shows how a routing profile interprets OpenStreetMap tags.
#[derive(Parser)]
struct Cli {
    /// Routing profile: foot, bike or car
    #[arg(short, long, default_value = "foot")]
    profile: String,

    /// Profile options, e.g. "block_fords=true|block_private=false"
    #[arg(short, long, default_value = "")]
    options: Options,

    /// Reference date for conditional tags (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    date: Option<NaiveDate>,

    /// Treat the tags as node tags and check whether the node is a barrier
    #[arg(short, long)]
    node: bool,

    /// Tags of the way or node, as key=value
    #[arg(required = true)]
    tags: Vec<String>,
}

pub fn main() -> Result<(), Box<dyn Error>> {
    colog::init();
    let cli = Cli::parse();

    let profile = Profile::by_name(&cli.profile)
        .ok_or_else(|| CliError::UnknownProfile(cli.profile.clone()))?;
    let tags = parse_tags(&cli.tags)?;

    let mut registry = Registry::new();
    profile.register(&mut registry)?;
    registry.build()?;

    let mut parser = WayParser::new(&registry, profile, cli.options)?;
    if let Some(date) = cli.date {
        parser = parser.with_reference_date(date);
    }

    if cli.node {
        println!("barrier: {}", parser.is_barrier(&tags));
        return Ok(());
    }

    let mut flags = registry.create_flags()?;
    let access = parser.handle_way_tags(&mut flags, &tags);
    let access_enc = parser.access().access_enc();
    let speed_enc = parser.speed().speed_enc();

    println!("access: {access:?}");
    println!("forward: {}", access_enc.get_bool(Direction::Forward, &flags));
    println!("backward: {}", access_enc.get_bool(Direction::Backward, &flags));
    println!("speed: {} km/h", speed_enc.get_decimal(Direction::Forward, &flags));

    if let Some(priority) = parser.priority() {
        let factor = priority
            .priority_enc()
            .get_decimal(Direction::Forward, &flags);
        match PriorityCode::from_factor(factor) {
            Some(code) => println!("priority: {code:?} ({factor:.1})"),
            None => println!("priority: {factor:.1}"),
        }
    }

    Ok(())
}

fn parse_tags(args: &[String]) -> Result<Tags, CliError> {
    args.iter()
        .map(|arg| {
            arg.split_once('=')
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .ok_or_else(|| CliError::MalformedTag(arg.clone()))
        })
        .collect()
}
