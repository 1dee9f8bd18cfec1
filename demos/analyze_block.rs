use std::collections::HashMap;

use blockscan_rs::image_pipeline::{BlockToBmpPipeline, CalibrationConfig};

fn main() -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "block.int".to_string());

    let pipeline = BlockToBmpPipeline::new(CalibrationConfig::default());
    let grid = pipeline.calibrate_file(&path)?;

    println!("Grid: {}x{} cells", grid.width, grid.height);

    let mut buckets: HashMap<u32, usize> = HashMap::new();
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut calibrated = 0usize;

    for cell in &grid.cells {
        if cell.is_calibrated {
            calibrated += 1;
            continue;
        }

        let bucket = ((cell.value.clamp(0.0, 1.0) * 10.0).floor() as u32).min(9);
        *buckets.entry(bucket).or_insert(0) += 1;

        min = min.min(cell.value);
        max = max.max(cell.value);
    }

    println!("Reference cells (shown red in the normalized view): {calibrated}");
    println!("Plain cell value range: {min:.6} ..= {max:.6}");
    println!("Distribution by tenths:");
    for bucket in 0..10u32 {
        let count = buckets.get(&bucket).copied().unwrap_or(0);
        println!(
            "  [{:.1}, {:.1}): {}",
            bucket as f64 / 10.0,
            (bucket + 1) as f64 / 10.0,
            count
        );
    }

    Ok(())
}
