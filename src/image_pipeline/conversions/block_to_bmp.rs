use std::io::Write;
use std::path::Path;

use tracing::{info, instrument};

use crate::image_pipeline::{
    block::{BlockIntReader, GridReader},
    bmp::{BmpWriter, StandardBmpWriter},
    calibrate::{CalibratedGrid, CalibrationConfig, CalibrationEngine},
    common::error::{PipelineError, Result},
    render::{NormalizedRenderer, ThicknessRenderer},
};

pub struct BlockToBmpPipeline<R: GridReader, W: BmpWriter> {
    reader: R,
    writer: W,
    engine: CalibrationEngine,
}

impl BlockToBmpPipeline<BlockIntReader, StandardBmpWriter> {
    pub fn new(config: CalibrationConfig) -> Self {
        Self {
            reader: BlockIntReader,
            writer: StandardBmpWriter,
            engine: CalibrationEngine::new(config),
        }
    }
}

impl<R: GridReader, W: BmpWriter> BlockToBmpPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: CalibrationConfig) -> Self {
        Self {
            reader,
            writer,
            engine: CalibrationEngine::new(config),
        }
    }

    pub fn config(&self) -> &CalibrationConfig {
        self.engine.config()
    }

    #[instrument(skip(self, input_data), fields(input_size = input_data.len()))]
    pub fn calibrate(&self, input_data: &[u8]) -> Result<CalibratedGrid> {
        info!("Starting block calibration");

        let raw = {
            let _span = tracing::info_span!("decode_block").entered();
            self.reader.read_grid(input_data)?
        };

        let grid = {
            let _span = tracing::info_span!(
                "calibrate_grid",
                width = raw.width,
                height = raw.height
            )
            .entered();
            self.engine.calibrate(&raw)?
        };

        info!(
            width = grid.width,
            height = grid.height,
            "Calibration complete"
        );
        Ok(grid)
    }

    #[instrument(skip(self, grid, output))]
    pub fn write_normalized(&self, grid: &CalibratedGrid, output: &mut dyn Write) -> Result<()> {
        let image = {
            let _span = tracing::info_span!("shade_normalized").entered();
            NormalizedRenderer.render(grid)
        };

        let _span = tracing::info_span!("encode_bmp").entered();
        self.writer.write_bmp(&image, output)
    }

    #[instrument(skip(self, grid, output))]
    pub fn write_thickness(&self, grid: &CalibratedGrid, output: &mut dyn Write) -> Result<()> {
        let image = {
            let _span = tracing::info_span!("shade_thickness").entered();
            ThicknessRenderer.render(grid)
        };

        let _span = tracing::info_span!("encode_bmp").entered();
        self.writer.write_bmp(&image, output)
    }

    #[instrument(skip(self, input_path))]
    pub fn calibrate_file<P: AsRef<Path>>(&self, input_path: P) -> Result<CalibratedGrid> {
        let input_path = input_path.as_ref();

        info!(input = %input_path.display(), "Calibrating file");

        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(input_path).map_err(|e| {
                PipelineError::InputReadError(format!("{}: {}", input_path.display(), e))
            })?
        };

        self.calibrate(&input_data)
    }

    #[instrument(skip(self, grid, output_path))]
    pub fn write_normalized_file<P: AsRef<Path>>(
        &self,
        grid: &CalibratedGrid,
        output_path: P,
    ) -> Result<()> {
        let output_path = output_path.as_ref();

        info!(output = %output_path.display(), "Writing normalized view");

        let mut output_file = std::fs::File::create(output_path).map_err(|e| {
            PipelineError::OutputWriteError(format!("{}: {}", output_path.display(), e))
        })?;

        self.write_normalized(grid, &mut output_file)
    }

    #[instrument(skip(self, grid, output_path))]
    pub fn write_thickness_file<P: AsRef<Path>>(
        &self,
        grid: &CalibratedGrid,
        output_path: P,
    ) -> Result<()> {
        let output_path = output_path.as_ref();

        info!(output = %output_path.display(), "Writing thickness view");

        let mut output_file = std::fs::File::create(output_path).map_err(|e| {
            PipelineError::OutputWriteError(format!("{}: {}", output_path.display(), e))
        })?;

        self.write_thickness(grid, &mut output_file)
    }
}
