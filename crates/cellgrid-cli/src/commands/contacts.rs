use super::{load_structure, select_model};
use crate::cli::ContactsArgs;
use crate::config::PartialContactsConfigFile;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use cellgrid::core::io::report::{write_contacts_csv, write_contacts_csv_to_path};
use cellgrid::engine::progress::ProgressReporter;
use cellgrid::workflows;
use tracing::{info, warn};

pub fn run(args: ContactsArgs, show_progress: bool) -> Result<()> {
    let partial_config = PartialContactsConfigFile::load(&args)?;
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_with_cli(&args)?;

    let mut structure = load_structure(&args.input)?;
    if let Some(images) = config.images {
        if structure.cell.is_crystal() {
            info!("Replacing symmetry operators from the input file.");
            structure.cell.set_images(images);
        } else {
            warn!(
                "'{}' has no crystal cell; ignoring the symmetry override.",
                structure.name
            );
        }
    }
    let model = select_model(&structure, args.model)?;

    let progress_handler = if show_progress {
        CliProgressHandler::new()
    } else {
        CliProgressHandler::hidden()
    };
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the contact search workflow...");
    let rows = workflows::contacts::run(model, &structure.cell, &config.search, &reporter)?;

    let written = match &args.output {
        Some(path) => {
            let written = write_contacts_csv_to_path(&rows, path)?;
            eprintln!("✓ {} contact(s) written to: {}", written, path.display());
            written
        }
        None => write_contacts_csv(&rows, std::io::stdout().lock())?,
    };
    info!("Wrote {} contact row(s).", written);
    Ok(())
}
