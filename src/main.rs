use pie_indicators::{
    Direction, IndicatorCommand, IndicatorConfig, Orientation, PieIndicator, ShapeKind,
};
use rand::Rng;
use std::env;
use std::io::{self, BufRead};
use std::sync::mpsc::{self, Sender};
use std::thread;
use std::time::Duration;

const USAGE: &str = "usage: pie-indicator [--shape full|half|quarter] [--orientation ne|nw|se|sw] \
[--direction cw|ccw] [--range MIN MAX] [--radius R] [--thickness T] [--title TITLE] \
[--font PATH] [--random]";

struct Args {
    shape: ShapeKind,
    orientation: Orientation,
    direction: Direction,
    range: (f64, f64),
    radius: Option<f64>,
    thickness: Option<f64>,
    title: String,
    font: Option<String>,
    random: bool,
}

fn next_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, String> {
    args.next().ok_or_else(|| format!("{flag} expects a value\n{USAGE}"))
}

fn parse_number(raw: &str, flag: &str) -> Result<f64, String> {
    raw.parse::<f64>()
        .map_err(|_| format!("{flag}: `{raw}` is not a number"))
}

fn parse_args() -> Result<Args, Box<dyn std::error::Error>> {
    let mut parsed = Args {
        shape: ShapeKind::Quarter,
        orientation: Orientation::NorthWest,
        direction: Direction::Clockwise,
        range: (0.0, 100.0),
        radius: None,
        thickness: None,
        title: "Pie Indicator".to_string(),
        font: None,
        random: false,
    };

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--shape" => parsed.shape = next_value(&mut args, &arg)?.parse()?,
            "--orientation" => parsed.orientation = next_value(&mut args, &arg)?.parse()?,
            "--direction" => parsed.direction = next_value(&mut args, &arg)?.parse()?,
            "--range" => {
                let min = parse_number(&next_value(&mut args, &arg)?, &arg)?;
                let max = parse_number(&next_value(&mut args, &arg)?, &arg)?;
                parsed.range = (min, max);
            }
            "--radius" => parsed.radius = Some(parse_number(&next_value(&mut args, &arg)?, &arg)?),
            "--thickness" => {
                parsed.thickness = Some(parse_number(&next_value(&mut args, &arg)?, &arg)?)
            }
            "--title" => parsed.title = next_value(&mut args, &arg)?,
            "--font" => parsed.font = Some(next_value(&mut args, &arg)?),
            "--random" => parsed.random = true,
            "--help" | "-h" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            other => return Err(format!("unknown argument `{other}`\n{USAGE}").into()),
        }
    }
    Ok(parsed)
}

/// Forwards one number per stdin line as a value update.
fn spawn_stdin_reader(sender: Sender<IndicatorCommand>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match trimmed.parse::<f64>() {
                Ok(value) => {
                    if sender.send(IndicatorCommand::SetValue(value)).is_err() {
                        break;
                    }
                }
                Err(_) => log::warn!("ignoring non-numeric input `{}`", trimmed),
            }
        }
    });
}

fn spawn_random_feed(sender: Sender<IndicatorCommand>, range: (f64, f64)) {
    thread::spawn(move || {
        let mut rng = rand::rng();
        loop {
            let value = rng.random_range(range.0..=range.1);
            if sender.send(IndicatorCommand::SetValue(value)).is_err() {
                break;
            }
            thread::sleep(Duration::from_millis(1200));
        }
    });
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = parse_args()?;
    let config = IndicatorConfig::builder()
        .shape(args.shape)
        .orientation(args.orientation)
        .direction(args.direction)
        .min_value(args.range.0)
        .max_value(args.range.1)
        .maybe_radius(args.radius)
        .ring_thickness(args.thickness.unwrap_or(pie_indicators::config::DEFAULT_RING_THICKNESS))
        .title(args.title)
        .show_label(args.font.is_some())
        .maybe_font_path(args.font)
        .build();

    let mut indicator = PieIndicator::new(config)?;
    log::info!(
        "{} indicator, range [{}, {}]",
        args.shape,
        args.range.0,
        args.range.1
    );

    let (sender, receiver) = mpsc::channel();
    if args.random {
        spawn_random_feed(sender, args.range);
    } else {
        spawn_stdin_reader(sender);
    }

    indicator.show_with_commands(receiver)
}
