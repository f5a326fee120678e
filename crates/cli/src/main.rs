use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use facemark_core::annotation::domain::face_annotator::{self, FaceAnnotator};
use facemark_core::detection::domain::face_detector::FaceDetector;
use facemark_core::detection::infrastructure::azure_face_client::{
    AzureFaceClient, FaceApiConfig,
};
use facemark_core::imaging::infrastructure::image_file_decoder::ImageFileDecoder;
use facemark_core::imaging::infrastructure::image_file_writer::ImageFileWriter;
use facemark_core::pipeline::annotate_folder_use_case::AnnotateFolderUseCase;
use facemark_core::pipeline::annotate_image_use_case::AnnotateImageUseCase;
use facemark_core::pipeline::outcome::{FileOutcome, ImageOutcome};

const ENDPOINT_VAR: &str = "AI_SERVICE_ENDPOINT";
const KEY_VAR: &str = "AI_SERVICE_KEY";

/// Face detection and annotation for images and folders.
#[derive(Parser)]
#[command(name = "facemark")]
struct Cli {
    /// Input image file, or a folder of images.
    input: PathBuf,

    /// Detection service endpoint (defaults to $AI_SERVICE_ENDPOINT).
    #[arg(long)]
    endpoint: Option<String>,

    /// Detection service access key (defaults to $AI_SERVICE_KEY).
    #[arg(long)]
    key: Option<String>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = FaceApiConfig {
        endpoint: setting(cli.endpoint, ENDPOINT_VAR)?,
        key: setting(cli.key, KEY_VAR)?,
    };
    log::debug!("detection endpoint: {}", config.endpoint);

    let detector: Box<dyn FaceDetector> = Box::new(AzureFaceClient::new(config)?);
    let use_case = AnnotateImageUseCase::new(
        detector,
        Box::new(ImageFileDecoder::new()),
        Box::new(ImageFileWriter::new()),
        FaceAnnotator::default(),
    );

    if cli.input.is_dir() {
        run_folder(&cli.input, use_case)
    } else {
        run_single(&cli.input, &use_case)
    }
}

fn run_single(
    input: &Path,
    use_case: &AnnotateImageUseCase,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Detecting faces in {}", input.display());
    let outcome = use_case.execute(input)?;
    report(&outcome);
    Ok(())
}

fn run_folder(
    input: &Path,
    use_case: AnnotateImageUseCase,
) -> Result<(), Box<dyn std::error::Error>> {
    let folder = AnnotateFolderUseCase::new(use_case);
    let summary = folder.execute(input)?;

    if summary.is_empty() {
        println!("No image files found.");
        return Ok(());
    }

    for FileOutcome { path, result } in &summary.outcomes {
        println!("\nProcessing: {}", path.display());
        match result {
            Ok(outcome) => report(outcome),
            Err(e) => println!("Error: {e}"),
        }
    }
    if summary.failures() > 0 {
        println!(
            "\n{} of {} files failed.",
            summary.failures(),
            summary.outcomes.len()
        );
    }
    Ok(())
}

fn report(outcome: &ImageOutcome) {
    match outcome {
        ImageOutcome::NoFaces => println!("No faces detected."),
        ImageOutcome::Annotated { faces, output_path } => {
            println!("{} faces detected.", faces.len());
            for line in face_annotator::summarize(faces) {
                println!("{line}");
            }
            println!("Results saved in {}", output_path.display());
        }
    }
}

/// Resolves a connection setting: explicit flag first, then the
/// environment variable.
fn setting(flag: Option<String>, var: &str) -> Result<String, String> {
    flag.or_else(|| std::env::var(var).ok())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| format!("{var} is not set"))
}
