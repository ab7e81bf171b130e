use pie_indicators::{
    Color, Direction, IndicatorCommand, IndicatorConfig, Orientation, PieIndicator, ShapeKind,
};
use rand::Rng;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Quarter indicator built with the bon-generated builder
    let config = IndicatorConfig::builder()
        .shape(ShapeKind::Quarter)
        .orientation(Orientation::SouthEast)
        .direction(Direction::Clockwise)
        .min_value(-20.0)
        .max_value(80.0)
        .ring_thickness(35.0)
        .main_color(Color::new(0xff, 0x80, 0x00))
        .title("Quarter pie demo")
        .build();

    let mut indicator = PieIndicator::new(config)?;

    let (sender, receiver) = mpsc::channel();

    // Random values, and every few updates a hop to the next corner
    thread::spawn(move || {
        let mut rng = rand::rng();
        let corners = Orientation::ALL;
        let mut step = 0usize;
        loop {
            let mut commands = vec![IndicatorCommand::SetValue(rng.random_range(-20.0..80.0))];
            if step % 4 == 3 {
                commands.push(IndicatorCommand::SetOrientation(corners[(step / 4) % corners.len()]));
            }

            if commands.into_iter().any(|cmd| sender.send(cmd).is_err()) {
                break;
            }

            step += 1;
            thread::sleep(Duration::from_millis(900));
        }
    });

    println!("Displaying a quarter pie indicator:");
    println!("- value: random in [-20, 80], animated");
    println!("- orientation: cycles through the four corners");
    println!("Close the window to exit");

    indicator.show_with_commands(receiver)
}
