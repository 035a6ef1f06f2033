use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use log::info;
use resume_render::{RenderOptions, Renderer, ResumeData, Template};

/// Renders resume data stored as JSON into a PDF document.
///
/// Fonts must be present under `assets/fonts` of the `resume_render` crate, next to the
/// executable, or in the directory named by `RESUME_RENDER_FONTS_DIR`; otherwise a system
/// font family is used when one can be found.
#[derive(Parser)]
#[command(author, version, about = "Render resumes to PDF")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a resume JSON file to PDF.
    Render {
        /// Resume data as JSON.
        #[arg(short, long)]
        input: PathBuf,

        /// Portrait image (PNG or JPEG).
        #[arg(short, long)]
        picture: Option<PathBuf>,

        /// Template name.
        #[arg(short, long, default_value = "Professional")]
        template: String,

        /// Destination file; defaults to `resume.pdf` in the working directory.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directory holding the bundled font family.
        #[arg(long)]
        fonts_dir: Option<PathBuf>,
    },

    /// List the available templates.
    Templates,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Render {
            input,
            picture,
            template,
            output,
            fonts_dir,
        } => render(
            &input,
            picture.as_deref(),
            &template,
            output,
            fonts_dir,
        ),
        Commands::Templates => {
            for template in Template::ALL {
                println!("{}", template);
            }
            Ok(())
        }
    };

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        print_error_sources(err.as_ref());
        std::process::exit(1);
    }
}

fn render(
    input: &Path,
    picture: Option<&Path>,
    template: &str,
    output: Option<PathBuf>,
    fonts_dir: Option<PathBuf>,
) -> Result<(), Box<dyn Error>> {
    let template = template.parse::<Template>()?;

    let json = fs::read_to_string(input)
        .map_err(|err| format!("Failed to read {}: {}", input.display(), err))?;
    let mut data: ResumeData = serde_json::from_str(&json)?;
    if let Some(path) = picture {
        let bytes = fs::read(path)
            .map_err(|err| format!("Failed to read picture {}: {}", path.display(), err))?;
        data.personal_info.picture = Some(bytes);
    }

    let mut options = RenderOptions::default();
    if let Some(dir) = fonts_dir {
        options = options.with_fonts_dir(dir);
    }

    let rendered = Renderer::new(options)?.render(&data, template)?;
    let output = output.unwrap_or_else(|| PathBuf::from(rendered.file_name()));
    fs::write(&output, &rendered.bytes)?;
    info!("Wrote {} bytes to {}", rendered.bytes.len(), output.display());
    println!("Saved {}", output.display());
    Ok(())
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
