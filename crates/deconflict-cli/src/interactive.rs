//! Prompt-driven fleet entry on a terminal.

use crate::input::InputError;
use deconflict_core::{Fleet, Point, Waypoint};
use std::io::{BufRead, Write};
use std::str::FromStr;

const AXIS_PROMPTS: [&str; 3] = ["x", "y", "z (altitude)"];

/// Everything collected from one interactive session.
#[derive(Debug, Clone)]
pub struct Session<P> {
    pub fleet: Fleet<P>,
    pub safety_distance_m: f64,
    pub time_step_s: f64,
}

/// Reads answers line by line, echoing prompts to `output`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask<T: FromStr>(&mut self, prompt: &str, expected: &'static str) -> Result<T, InputError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(InputError::UnexpectedEof(prompt.trim().to_string()));
        }
        let value = line.trim();
        value.parse().map_err(|_| InputError::BadEntry {
            value: value.to_string(),
            expected,
        })
    }

    fn ask_waypoints<P: Point>(&mut self, drone_id: &str) -> Result<Vec<Waypoint<P>>, InputError> {
        let count: usize = self.ask(
            &format!("\nEnter number of waypoints for {drone_id}: "),
            "a waypoint count",
        )?;
        if count < 2 {
            writeln!(self.output, "Drone '{drone_id}' has insufficient waypoints.")?;
        }

        let mut waypoints = Vec::with_capacity(count);
        for index in 0..count {
            writeln!(self.output, "Waypoint {}:", index + 1)?;
            let mut values = Vec::with_capacity(P::DIMENSIONS + 1);
            for axis in &AXIS_PROMPTS[..P::DIMENSIONS] {
                values.push(self.ask::<f64>(&format!("  {axis}: "), "a number")?);
            }
            values.push(self.ask::<f64>("  time: ", "a number")?);

            let waypoint = Waypoint::from_tuple(&values).ok_or_else(|| InputError::WrongArity {
                drone_id: drone_id.to_string(),
                index,
                expected: P::DIMENSIONS + 1,
                found: values.len(),
            })?;
            waypoints.push(waypoint);
        }
        Ok(waypoints)
    }

    /// Collect drones, their waypoints, and the detection settings.
    ///
    /// A name entered twice replaces the earlier trajectory.
    pub fn run<P: Point>(&mut self) -> Result<Session<P>, InputError> {
        let drone_count: usize = self.ask("Enter number of drones: ", "a drone count")?;

        let mut fleet = Fleet::new();
        for index in 0..drone_count {
            let name: String =
                self.ask(&format!("\nEnter name for Drone {}: ", index + 1), "a name")?;
            if name.is_empty() {
                return Err(InputError::EmptyId { index });
            }
            let waypoints = self.ask_waypoints::<P>(&name)?;
            if fleet.insert_waypoints(name.clone(), waypoints).is_some() {
                tracing::warn!("Drone '{}' entered twice; keeping the later path", name);
            }
        }

        let safety_distance_m = self.ask("\nEnter safety distance (meters): ", "a distance")?;
        let time_step_s = self.ask("Enter time step for checking (seconds): ", "a time step")?;

        Ok(Session {
            fleet,
            safety_distance_m,
            time_step_s,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deconflict_core::{Point2, Point3};
    use std::io::Cursor;

    #[test]
    fn collects_spatial_session() {
        let answers = "2\nA\n2\n0\n0\n10\n0\n0\n0\n10\n10\nB\n2\n1\n0\n10\n0\n1\n0\n10\n10\n5\n1\n";
        let mut output = Vec::new();
        let session = Prompter::new(Cursor::new(answers), &mut output)
            .run::<Point3>()
            .unwrap();

        assert_eq!(session.fleet.ids().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(session.safety_distance_m, 5.0);
        assert_eq!(session.time_step_s, 1.0);
        let b = session.fleet.get("B").unwrap();
        assert_eq!(b.waypoints()[0].position, Point3::new(1.0, 0.0, 10.0));

        let transcript = String::from_utf8(output).unwrap();
        assert!(transcript.contains("Enter name for Drone 2: "));
        assert!(transcript.contains("z (altitude): "));
    }

    #[test]
    fn planar_session_skips_altitude() {
        let answers = "1\nsolo\n1\n3\n4\n0\n2.5\n0.5\n";
        let mut output = Vec::new();
        let session = Prompter::new(Cursor::new(answers), &mut output)
            .run::<Point2>()
            .unwrap();

        let solo = session.fleet.get("solo").unwrap();
        assert!(solo.is_degenerate());
        let transcript = String::from_utf8(output).unwrap();
        assert!(transcript.contains("Drone 'solo' has insufficient waypoints."));
        assert!(!transcript.contains("altitude"));
    }

    #[test]
    fn bad_number_is_an_error() {
        let mut output = Vec::new();
        let result = Prompter::new(Cursor::new("two\n"), &mut output).run::<Point2>();
        assert!(matches!(result, Err(InputError::BadEntry { .. })));
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut output = Vec::new();
        let result = Prompter::new(Cursor::new("2\nA\n0\n  \n"), &mut output).run::<Point2>();
        assert!(matches!(result, Err(InputError::EmptyId { index: 1 })));
    }

    #[test]
    fn early_end_of_input_is_an_error() {
        let mut output = Vec::new();
        let result = Prompter::new(Cursor::new("1\nA\n"), &mut output).run::<Point2>();
        assert!(matches!(result, Err(InputError::UnexpectedEof(_))));
    }
}
