mod app;
mod settings;
mod voice;

use clap::Parser;

use app::{AppOptions, LoupeApp};

/// Live video magnifier with voice and key control.
#[derive(Parser)]
#[command(name = "loupe")]
struct Args {
    /// Start fullscreen.
    #[arg(long)]
    fullscreen: bool,

    /// Read voice phrases from stdin, one per line.
    #[arg(long)]
    voice_stdin: bool,

    /// Capture from webcam N instead of the built-in test pattern.
    #[cfg(feature = "camera")]
    #[arg(long)]
    camera: Option<u32>,
}

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let options = AppOptions {
        voice_stdin: args.voice_stdin,
        #[cfg(feature = "camera")]
        camera: args.camera,
    };

    let viewport = egui::ViewportBuilder::default()
        .with_title("Loupe")
        .with_inner_size([1280.0, 720.0])
        .with_fullscreen(args.fullscreen);
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "loupe",
        native_options,
        Box::new(move |cc| Ok(Box::new(LoupeApp::new(cc, options)?))),
    )
}
