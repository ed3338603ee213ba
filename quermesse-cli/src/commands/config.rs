use std::path::Path;

use anyhow::Result;
use owo_colors::OwoColorize;
use quermesse_core::Config;
use quermesse_core::links::map_url;

pub fn run(config: &Config, explicit_path: Option<&Path>) -> Result<()> {
    let config_path = match explicit_path {
        Some(p) => p.to_path_buf(),
        None => Config::config_path()?,
    };

    println!("{}", "Paths".bold());
    println!("  Config:      {}", config_path.display());

    println!("{}", "Calendar".bold());
    println!("  Id:          {}", config.calendar_id);
    println!("  API key:     {}", config.masked_api_key());
    println!("  Endpoint:    {}", config.calendar_base_url);

    println!("{}", "Geocoder".bold());
    println!("  Endpoint:    {}", config.geocoder_base_url);
    println!("  User agent:  {}", config.user_agent);
    println!("  Timeout:     {}s", config.timeout.as_secs());

    println!("{}", "Map".bold());
    println!("  Center:      {}", config.map_center);
    println!("  View:        {}", map_url(config.map_center, config.map_zoom).dimmed());

    Ok(())
}
