use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
use std::fs;

use crate::{app::App, error::Result, test_config::TestConfig, ui};

pub fn generate_screenshot(
    config_path: &str,
    output_path: Option<&str>,
    width: u16,
    height: u16,
) -> Result<()> {
    let config = TestConfig::load_from_file(config_path)?;
    let app = App::from_test_config(&config);

    let screenshot = render_to_string(&app, width, height)?;

    match output_path {
        Some(path) => {
            fs::write(path, screenshot)?;
            println!("Screenshot saved to: {}", path);
        }
        None => {
            print!("{}", screenshot);
        }
    }

    Ok(())
}

/// Render one frame of `app` off-screen and return it as text.
pub fn render_to_string(app: &App, width: u16, height: u16) -> Result<String> {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend)?;

    terminal.draw(|frame| {
        ui::draw(frame, app);
    })?;

    Ok(buffer_to_string(terminal.backend().buffer()))
}

pub fn buffer_to_string(buffer: &Buffer) -> String {
    let mut result = String::new();

    for y in 0..buffer.area().height {
        for x in 0..buffer.area().width {
            let sym = buffer[(x, y)].symbol();

            // Empty cells still take a column
            if sym.is_empty() {
                result.push(' ');
            } else {
                result.push_str(sym);
            }
        }
        result.push('\n');
    }

    result
}
