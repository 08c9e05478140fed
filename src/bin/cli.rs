//! motorsong CLI — headless song playback on the simulated planner.
//!
//! Usage:
//!   ms-cli path/to/file.song
//!   ms-cli --demo
//!   ms-cli --demo --plan

use ms_ir::AXIS_COUNT;
use ms_motion::{MotionOutput, SimPlanner};
use ms_player::Controller;
use std::{env, fs};

/// Built-in demonstration tune: an Ode to Joy fragment, three note codes
/// per row, terminated.
const DEMO_SONG: &[u8] = &[
    52, 48, 36,
    52, 48, 128,
    53, 50, 128,
    55, 50, 36,
    55, 50, 128,
    53, 50, 128,
    52, 48, 36,
    50, 47, 128,
    48, 45, 36,
    48, 45, 128,
    50, 47, 128,
    52, 48, 36,
    52, 129, 129,
    50, 129, 129,
    50, 128, 128,
    128, 128, 128,
    255,
];

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let dump_plan = args.iter().any(|a| a == "--plan");

    let (name, data) = if args.iter().any(|a| a == "--demo") {
        ("demo".to_string(), DEMO_SONG.to_vec())
    } else {
        let path = args.get(1).filter(|a| !a.starts_with("--")).unwrap_or_else(|| {
            eprintln!("Usage: ms-cli <file.song> [--plan] | --demo [--plan]");
            std::process::exit(1);
        });
        let data = fs::read(path).unwrap_or_else(|e| {
            eprintln!("Failed to read {}: {}", path, e);
            std::process::exit(1);
        });
        (path.clone(), data)
    };

    let mut score = ms_formats::load_song(&data).unwrap_or_else(|e| {
        eprintln!("Failed to decode {}: {}", name, e);
        std::process::exit(1);
    });
    let _ = score.title.try_push_str(&name);

    let mut ctrl = Controller::default();
    ctrl.set_score(score);

    println!("Title:    {}", ctrl.score().title);
    println!("Rows:     {}", ctrl.score().len());
    println!("Duration: {:.2} s", ctrl.duration_seconds());
    println!();

    if dump_plan {
        dump_commands(&ctrl);
    } else {
        simulate(&mut ctrl);
    }
}

fn simulate(ctrl: &mut Controller) {
    let mut planner = SimPlanner::new([0.0; AXIS_COUNT]);
    let summary = ctrl.play(&mut planner).unwrap_or_else(|e| {
        eprintln!("Playback failed: {}", e);
        std::process::exit(1);
    });
    planner.synchronize();

    println!("Moves:    {}", summary.moves);
    println!("Dwells:   {}", summary.dwells);
    println!(
        "Final:    [{:.2}, {:.2}, {:.2}, {:.2}] mm",
        summary.final_position[0],
        summary.final_position[1],
        summary.final_position[2],
        summary.final_position[3]
    );
    println!("Done.");
}

fn dump_commands(ctrl: &Controller) {
    let commands = ctrl.plan([0.0; AXIS_COUNT]).unwrap_or_else(|e| {
        eprintln!("Planning failed: {}", e);
        std::process::exit(1);
    });

    for (row, cmd) in commands.iter().enumerate() {
        match cmd {
            ms_player::StepCommand::Move(mv) => println!(
                "{:4}: move to [{:.3}, {:.3}, {:.3}] at {:.1} mm/s",
                row, mv.target[0], mv.target[1], mv.target[2], mv.feed_rate
            ),
            ms_player::StepCommand::Dwell { ms } => {
                println!("{:4}: dwell {} ms", row, ms)
            }
        }
    }
}
