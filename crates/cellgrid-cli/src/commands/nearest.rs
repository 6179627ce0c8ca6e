use super::{load_structure, select_model};
use crate::cli::NearestArgs;
use crate::config::DefaultsConfig;
use crate::error::{CliError, Result};
use cellgrid::workflows::{self, nearest::NearestHit};
use nalgebra::Point3;
use tracing::info;

fn find(args: &NearestArgs) -> Result<Option<NearestHit>> {
    let &[x, y, z] = args.point.as_slice() else {
        return Err(CliError::Argument(format!(
            "Expected three coordinates for --point, got {}.",
            args.point.len()
        )));
    };
    let point = Point3::new(x, y, z);
    let radius = args
        .radius
        .unwrap_or(DefaultsConfig::default().nearest_radius);

    let structure = load_structure(&args.input)?;
    let model = select_model(&structure, args.model)?;
    info!("Searching for the atom nearest to {:?} within {:.2} Å.", point, radius);
    Ok(workflows::nearest::run(model, &structure.cell, &point, radius)?)
}

pub fn run(args: NearestArgs) -> Result<()> {
    match find(&args)? {
        Some(hit) => println!(
            "{}\timage {}\t{:.3} Å\t({:.3}, {:.3}, {:.3})",
            hit.label, hit.image, hit.distance, hit.position[0], hit.position[1], hit.position[2]
        ),
        None => println!("No atom found within the search radius."),
    }
    Ok(())
}
