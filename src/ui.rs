// UI layer: a simple interactive menu using `dialoguer`. Every choice is
// turned into a call on the session; this module only prompts and prints.

use anyhow::Result;
use crossterm::style::Stylize;
use dialoguer::{Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

use crate::api::ApiClient;
use crate::file::SelectedFile;
use crate::session::Session;
use crate::state::RequestState;
use crate::style::Style;
use crate::styled::DOWNLOAD_FILE_NAME;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif", "bmp", "tif", "tiff"];

enum MenuItem {
    ChooseImage,
    ChooseStyle,
    Generate,
    Download,
    Exit,
}

impl MenuItem {
    fn label(&self) -> &'static str {
        match self {
            MenuItem::ChooseImage => "Choose image",
            MenuItem::ChooseStyle => "Choose style",
            MenuItem::Generate => "✨ Generate",
            MenuItem::Download => "⬇️  Download",
            MenuItem::Exit => "Exit",
        }
    }
}

/// Main interactive menu. Runs a select loop until the user chooses
/// "Exit". The Download entry only shows up once there is a result.
pub fn main_menu(mut session: Session<ApiClient>) -> Result<()> {
    println!("{}", "🎨 Cute AI Image Styler".magenta().bold());
    println!("Sending to {}", session.stylizer().endpoint());

    loop {
        print_status(&session);

        let mut items = vec![MenuItem::ChooseImage, MenuItem::ChooseStyle, MenuItem::Generate];
        if session.state().result().is_some() {
            items.push(MenuItem::Download);
        }
        items.push(MenuItem::Exit);

        let labels: Vec<&str> = items.iter().map(MenuItem::label).collect();
        let selection = Select::new().items(&labels).default(0).interact()?;
        match items[selection] {
            MenuItem::ChooseImage => {
                if let Some(path) = pick_image_path()? {
                    match SelectedFile::open(&path) {
                        Ok(file) => session.select_file(file),
                        Err(e) => println!("{}", format!("{e:#}").red()),
                    }
                }
            }
            MenuItem::ChooseStyle => {
                let current = session.state().style().unwrap_or_default();
                session.select_style(pick_style(current)?);
            }
            MenuItem::Generate => handle_generate(&mut session)?,
            MenuItem::Download => match session.download() {
                Ok(Some(path)) => println!("{} {}", "Saved".green(), path.display()),
                Ok(None) => {}
                Err(e) => println!("{}", format!("Download failed: {e:#}").red()),
            },
            MenuItem::Exit => break,
        }
    }
    Ok(())
}

/// One line for the original image and one for the styled result.
fn print_status(session: &Session<ApiClient>) {
    let state = session.state();
    match (state.file(), state.preview()) {
        (Some(file), Some(preview)) => {
            let size = preview
                .dimensions()
                .map(|(w, h)| format!(" {w}x{h}"))
                .unwrap_or_default();
            println!(
                "Original Image: {}{} (preview at {})",
                file.name(),
                size,
                preview.path().display()
            );
        }
        (Some(file), None) => println!("Original Image: {}", file.name()),
        (None, _) => println!("{}", "No image chosen yet.".dim()),
    }
    if let (Some(result), Some(style)) = (state.result(), state.style()) {
        let (w, h) = result.dimensions();
        println!("Styled Image ({}): {w}x{h}", style.label());
        println!(
            "{}",
            format!(
                "Download saves to {}",
                session.download_dir().join(DOWNLOAD_FILE_NAME).display()
            )
            .dim()
        );
    }
}

/// Ask for an image either through the native file dialog or by typing a
/// path. `None` means the user backed out.
fn pick_image_path() -> Result<Option<PathBuf>> {
    let how = Select::new()
        .with_prompt("Image source")
        .items(&["Browse...", "Type a path"])
        .default(0)
        .interact()?;
    if how == 0 {
        return Ok(rfd::FileDialog::new()
            .add_filter("Images", IMAGE_EXTENSIONS)
            .pick_file());
    }
    let path: String = Input::new()
        .with_prompt("Image file path")
        .allow_empty(true)
        .interact_text()?;
    let path = path.trim();
    Ok((!path.is_empty()).then(|| PathBuf::from(path)))
}

fn pick_style(current: Style) -> Result<Style> {
    let labels: Vec<&str> = Style::ALL.iter().map(|s| s.label()).collect();
    let default = Style::ALL.iter().position(|s| *s == current).unwrap_or(0);
    let idx = Select::new()
        .with_prompt("Choose Style")
        .items(&labels)
        .default(default)
        .interact()?;
    Ok(Style::ALL[idx])
}

fn handle_generate(session: &mut Session<ApiClient>) -> Result<()> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message("Generating...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let outcome = session.generate().clone();
    spinner.finish_and_clear();

    match outcome {
        RequestState::Succeeded => println!("{}", "Styled image ready.".green()),
        RequestState::Failed(msg) => println!("{}", msg.red()),
        RequestState::Idle | RequestState::Submitting => {}
    }
    Ok(())
}
