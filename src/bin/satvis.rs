/*
    Satvis, satellite collection coordination
    Copyright (C) 2023 Christopher Rabotin <christopher.rabotin@gmail.com>

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU Affero General Public License for more details.

    You should have received a copy of the GNU Affero General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

extern crate clap;
extern crate log;
extern crate pretty_env_logger;
extern crate satvis;

use clap::{Arg, Command};
use log::{error, info, warn};
use satvis::headless::headless_coordinator;
use satvis::io::parse_epoch;
use satvis::prelude::*;
use std::env::{set_var, var};
use std::path::{Path, PathBuf};

const LOG_VAR: &str = "SATVIS_LOG";

fn main() -> Result<(), ConfigError> {
    let app = Command::new("satvis")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Loads a satellite collection and reports what is shown and highlighted.")
        .arg(
            Arg::new("CONFIG")
                .help("Sets the coordinator configuration file to use")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("at")
                .short('a')
                .long("at")
                .value_name("epoch")
                .help("Simulation epoch of the highlighting, defaults to now"),
        )
        .arg(
            Arg::new("root")
                .short('r')
                .long("root")
                .value_name("directory")
                .help("Directory the sources are relative to, defaults to the directory of the configuration"),
        )
        .arg(
            Arg::new("track")
                .short('t')
                .long("track")
                .value_name("satellite name")
                .help("Satellite to track, overrides the configuration"),
        );

    let matches = app.get_matches();

    if var(LOG_VAR).is_err() {
        set_var(LOG_VAR, "INFO");
    }

    if pretty_env_logger::try_init_custom_env(LOG_VAR).is_err() {
        println!("could not init logger");
    }

    let Some(cfg_path) = matches.get_one::<String>("CONFIG") else {
        return Err(ConfigError::InvalidConfig {
            msg: "no configuration file provided".to_string(),
        });
    };

    let mut cfg = CoordinatorConfig::load(cfg_path)?;
    info!("Loaded configuration `{cfg_path}`");

    if let Some(name) = matches.get_one::<String>("track") {
        cfg.tracked_satellite = Some(name.clone());
    }

    let epoch = match matches.get_one::<String>("at") {
        Some(at) => parse_epoch(at).map_err(|e| ConfigError::InvalidConfig {
            msg: format!("invalid epoch `{at}`: {e}"),
        })?,
        None => Epoch::now().map_err(|e| ConfigError::InvalidConfig {
            msg: format!("could not read the system clock: {e}"),
        })?,
    };

    let root = match matches.get_one::<String>("root") {
        Some(root) => PathBuf::from(root),
        None => Path::new(cfg_path)
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default(),
    };
    let fetcher = LocalFiles::new(root);

    let (mut coord, handles) = headless_coordinator(epoch);
    let report = coord.bootstrap(&fetcher, &cfg);
    for failure in &report.failures {
        error!("{failure}");
    }
    handles.deliver_signals(&mut coord);

    if let Some(name) = coord.pending_tracked_satellite() {
        warn!("{name} was requested for tracking but was never loaded");
    }

    println!("Tags:");
    for (tag, names) in coord.taglist() {
        println!("  {tag} ({}): {}", names.len(), names.join(", "));
    }

    println!("Active satellites at {epoch}:");
    for sat in coord.active_satellites() {
        println!(
            "  {:<24} {:<8} [{}]",
            sat.name,
            sat.entity.color().to_string(),
            sat.entity
                .shown_components()
                .iter()
                .map(|c| c.label())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    if let Some(name) = coord.tracked_satellite() {
        let visible = coord.visibility().visible_peers(name, epoch);
        println!("Tracking {name}, {} peers in view: {}", visible.len(), visible.join(", "));
    }

    if let Some(station) = coord.ground_station() {
        println!("Ground station: {station}");
    }

    Ok(())
}
