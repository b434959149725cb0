//! Command-line settings of the simulator.

use clap::{Parser, ValueEnum};

use crate::domain::{ConfigError, DriveMode, DriveType, Footprint, SimulationConfig};

#[derive(Parser, Debug, Clone)]
#[command(name = "field-drive-sim")]
#[command(about = "Top-down simulator of a holonomic robot on a 144 inch field")]
pub struct Args {
    /// Initial interpretation of translation inputs
    #[arg(long, value_enum, default_value_t = DriveModeArg::RobotCentric)]
    pub drive_mode: DriveModeArg,

    /// Drive train of the robot
    #[arg(long, value_enum, default_value_t = DriveTypeArg::Mecanum)]
    pub drive_type: DriveTypeArg,

    /// Match side; the blue view is rotated by half a turn
    #[arg(long, value_enum, default_value_t = Alliance::Red)]
    pub alliance: Alliance,

    /// Robot width (inches)
    #[arg(long, default_value_t = 17.25)]
    pub robot_width: f64,

    /// Robot length along its heading (inches)
    #[arg(long, default_value_t = 17.25)]
    pub robot_length: f64,
}

impl Args {
    pub fn to_config(&self) -> Result<SimulationConfig, ConfigError> {
        let footprint = Footprint::new(self.robot_width, self.robot_length)?;
        Ok(SimulationConfig::default()
            .with_footprint(footprint)
            .with_drive_mode(self.drive_mode.into())
            .with_drive_type(self.drive_type.into()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DriveModeArg {
    RobotCentric,
    FieldCentric,
}

impl From<DriveModeArg> for DriveMode {
    fn from(value: DriveModeArg) -> Self {
        match value {
            DriveModeArg::RobotCentric => DriveMode::RobotCentric,
            DriveModeArg::FieldCentric => DriveMode::FieldCentric,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DriveTypeArg {
    Mecanum,
    Tank,
}

impl From<DriveTypeArg> for DriveType {
    fn from(value: DriveTypeArg) -> Self {
        match value {
            DriveTypeArg::Mecanum => DriveType::Mecanum,
            DriveTypeArg::Tank => DriveType::Tank,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Alliance {
    #[default]
    Red,
    Blue,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["field-drive-sim"]).unwrap();
        assert_eq!(args.alliance, Alliance::Red);
        assert_eq!(args.to_config(), Ok(SimulationConfig::default()));
    }

    #[rstest]
    #[case::field_centric(
        &["--drive-mode", "field-centric"],
        DriveMode::FieldCentric,
        DriveType::Mecanum,
        Alliance::Red
    )]
    #[case::tank_blue(
        &["--drive-type", "tank", "--alliance", "blue"],
        DriveMode::RobotCentric,
        DriveType::Tank,
        Alliance::Blue
    )]
    fn test_parse(
        #[case] flags: &[&str],
        #[case] drive_mode: DriveMode,
        #[case] drive_type: DriveType,
        #[case] alliance: Alliance,
    ) {
        let args =
            Args::try_parse_from(std::iter::once("field-drive-sim").chain(flags.iter().copied()))
                .unwrap();
        let config = args.to_config().unwrap();
        assert_eq!(config.drive_mode, drive_mode);
        assert_eq!(config.drive_type, drive_type);
        assert_eq!(args.alliance, alliance);
    }

    #[test]
    fn test_robot_size_sets_footprint() {
        let args = Args::try_parse_from([
            "field-drive-sim",
            "--robot-width",
            "12",
            "--robot-length",
            "18",
        ])
        .unwrap();
        assert_eq!(
            args.to_config().unwrap().footprint,
            Footprint::new(12.0, 18.0).unwrap()
        );
    }

    #[test]
    fn test_invalid_robot_size_is_a_config_error() {
        let args = Args::try_parse_from(["field-drive-sim", "--robot-width", "0"]).unwrap();
        assert_eq!(
            args.to_config().unwrap_err().to_string(),
            "invalid footprint: footprint width must be a positive finite number, got 0"
        );
    }

    #[test]
    fn test_rejects_unknown_value() {
        assert!(Args::try_parse_from(["field-drive-sim", "--drive-type", "swerve"]).is_err());
    }
}
