use std::io::Write;

use blockscan_rs::image_pipeline::{
    BlockToBmpPipeline, BmpWriter, CalibrationConfig, GridReader, Result,
};
use blockscan_rs::logger;

use tracing::{error, info};

const INPUT_FILE: &str = "block.int";
const NORMALIZED_FILE: &str = "normalized_image.bmp";
const THICKNESS_FILE: &str = "thickness_image.bmp";

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    logger::init();

    info!("Starting blockscan...");

    let config = CalibrationConfig::builder().build();
    let pipeline = BlockToBmpPipeline::new(config);

    info!("Block to BMP pipeline initialized");
    info!("Signal threshold: {}", pipeline.config().signal_threshold);
    info!(
        "Reference strips: {} rows, {} columns",
        pipeline.config().reference_rows,
        pipeline.config().reference_columns
    );

    if let Err(e) = run(&pipeline) {
        error!("Processing failed: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn run<R: GridReader, W: BmpWriter>(pipeline: &BlockToBmpPipeline<R, W>) -> Result<()> {
    let grid = pipeline.calibrate_file(INPUT_FILE)?;

    pipeline.write_normalized_file(&grid, NORMALIZED_FILE)?;
    info!("Image '{}' generated successfully", NORMALIZED_FILE);

    if prompt_for_thickness()? {
        pipeline.write_thickness_file(&grid, THICKNESS_FILE)?;
        info!("Image '{}' generated successfully", THICKNESS_FILE);
    }

    Ok(())
}

fn prompt_for_thickness() -> std::io::Result<bool> {
    print!("Input 1 to check thickness: ");
    std::io::stdout().flush()?;

    let mut choice = String::new();
    std::io::stdin().read_line(&mut choice)?;
    Ok(choice.trim() == "1")
}
