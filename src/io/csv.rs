use std::fs::File;
use std::io::{self, Write};

use crate::model::{Ensemble, SimParams};
use crate::sim::Recorder;

// ---------------------------------------------------------------------------
// CSV trajectory recorder
// ---------------------------------------------------------------------------

/// Writes one CSV row per completed step.
///
/// Columns: step, time, then per particle the position components
/// `p{i}_x{k}` and velocity components `v{i}_x{k}`. The header is emitted
/// lazily on the first record, once the particle count and dimensionality
/// are known.
pub struct CsvRecorder<W: Write> {
    writer: W,
    steps_recorded: usize,
    wrote_header: bool,
}

impl<W: Write> CsvRecorder<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            steps_recorded: 0,
            wrote_header: false,
        }
    }
}

impl CsvRecorder<File> {
    /// Recorder writing to a fresh file at `path`.
    pub fn create(path: &str) -> io::Result<Self> {
        Ok(Self::new(File::create(path)?))
    }
}

impl<W: Write> Recorder for CsvRecorder<W> {
    fn record(&mut self, ensemble: &Ensemble, params: &SimParams) -> io::Result<()> {
        if !self.wrote_header {
            write!(self.writer, "step,time")?;
            for i in 0..ensemble.len() {
                for k in 0..ensemble.dim() {
                    write!(self.writer, ",p{}_x{}", i, k)?;
                }
                for k in 0..ensemble.dim() {
                    write!(self.writer, ",v{}_x{}", i, k)?;
                }
            }
            writeln!(self.writer)?;
            self.wrote_header = true;
        }

        self.steps_recorded += 1;
        let time = self.steps_recorded as f64 * params.dt;

        write!(self.writer, "{},{:.6}", self.steps_recorded, time)?;
        for i in 0..ensemble.len() {
            for x in ensemble.positions[i].iter() {
                write!(self.writer, ",{:.6e}", x)?;
            }
            for v in ensemble.velocities[i].iter() {
                write!(self.writer, ",{:.6e}", v)?;
            }
        }
        writeln!(self.writer)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::dvector;

    fn pair() -> (Ensemble, SimParams) {
        let ensemble = Ensemble::new(
            vec![1.0, 2.0],
            vec![dvector![0.0, 0.0], dvector![1.0, 1.0]],
            vec![dvector![0.5, 0.0], dvector![0.0, -0.5]],
        )
        .unwrap();
        let params = SimParams::new(6.67e-11, 0.25, 2, 2).unwrap();
        (ensemble, params)
    }

    #[test]
    fn csv_output_has_header_and_rows() {
        let (ensemble, params) = pair();
        let mut buf = Vec::new();
        {
            let mut recorder = CsvRecorder::new(&mut buf);
            recorder.record(&ensemble, &params).unwrap();
            recorder.record(&ensemble, &params).unwrap();
        }

        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 3); // header + 2 data rows
        assert!(lines[0].starts_with("step,time,p0_x0,p0_x1,v0_x0,v0_x1"));
        assert!(lines[1].starts_with("1,0.25"));
        assert!(lines[2].starts_with("2,0.5"));
    }

    #[test]
    fn row_width_matches_ensemble_shape() {
        let (ensemble, params) = pair();
        let mut buf = Vec::new();
        {
            let mut recorder = CsvRecorder::new(&mut buf);
            recorder.record(&ensemble, &params).unwrap();
        }

        let output = String::from_utf8(buf).unwrap();
        let expected_cols = 2 + 2 * 2 * 2; // step, time + n·(2·d)
        for line in output.lines() {
            assert_eq!(line.split(',').count(), expected_cols);
        }
    }
}
