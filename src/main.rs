use bevy::{prelude::*, window::WindowResolution};
use clap::Parser;


mod controller;
mod domain;
mod resource;
mod settings;
mod simulator;
mod visualizer;

fn main() {
    let args = settings::Args::parse();

    let scheduler = match args
        .to_config()
        .and_then(domain::TickScheduler::new)
    {
        Ok(scheduler) => scheduler,
        Err(error) => {
            eprintln!("Error: {error}");
            std::process::exit(1);
        }
    };

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "FTC Virtual Robot Simulator".into(),
                resolution: WindowResolution::new(800.0, 800.0),
                resizable: false,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(controller::Controller)
        .add_plugins(visualizer::Visualizer::new(args.alliance))
        .add_plugins(simulator::Simulator::new(scheduler))
        .run();
}
