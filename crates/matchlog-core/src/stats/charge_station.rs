//! Charge-station statistic
//!
//! Detects whether the robot attempted to balance on the charge station at
//! the end of autonomous, from pose, gyro pitch, match phase, and the
//! selected auto routine's name.

use serde::{Deserialize, Serialize};

use super::Statistic;
use crate::geometry::{Pose2d, Rotation2d, Translation2d};
use crate::snapshot::Snapshot;

const DRIVER_STATION_TABLE: &str = "DriverStation";
const ALLIANCE_STATION: &str = "AllianceStation";
const MATCH_TIME: &str = "MatchTime";
const AUTONOMOUS: &str = "Autonomous";
const ENABLED: &str = "Enabled";

const DASHBOARD_INPUTS_TABLE: &str = "DashboardInputs";
const AUTO_SELECTOR: &str = "AutoSelector";

const GYRO_TABLE: &str = "Gyro";
const PITCH_POSITION_DEG: &str = "PitchPositionDeg";

const REAL_OUTPUTS_TABLE: &str = "RealOutputs";
const ODOMETRY_TABLE: &str = "Odometry";
const ROBOT_2D: &str = "Robot2d";

/// Auto routine names containing any of these are taken as balance paths.
const BALANCE_PATH_KEYWORDS: [&str; 2] = ["charge", "bal"];

/// Seconds left in autonomous at or below which the balance heuristic runs.
const AUTO_END_WINDOW_SECONDS: i64 = 1;
/// Seconds left on the match clock at or below which teleop is endgame.
const ENDGAME_WINDOW_SECONDS: i64 = 30;

/// Field geometry and pitch thresholds for charge-station detection.
///
/// Coordinates are meters in the blue-alliance frame. `Default` is the 2023
/// field; adjust per season.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldGeometry {
    /// Origin a red-alliance pose is taken relative to for the 180-degree
    /// field-symmetry flip: the far corner, rotated half a turn.
    pub flip_origin: Pose2d,
    /// Bottom-left corner of the charge-station footprint.
    pub station_bottom_left: Translation2d,
    /// Top-right corner of the charge-station footprint.
    pub station_top_right: Translation2d,
    /// Minimum |pitch| in degrees that counts as attempting to balance.
    pub attempt_pitch_deg: f64,
    /// Maximum |pitch| in degrees that counts as balanced.
    pub balanced_pitch_deg: f64,
}

impl Default for FieldGeometry {
    fn default() -> Self {
        Self {
            flip_origin: Pose2d::new(16.54175, 8.0137, Rotation2d::new(std::f64::consts::PI)),
            station_bottom_left: Translation2d::new(2.92, 1.50),
            station_top_right: Translation2d::new(4.86, 4.01),
            attempt_pitch_deg: 12.0,
            balanced_pitch_deg: 4.0,
        }
    }
}

/// Match-phase flags derived from the driver-station channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseFlags {
    /// Autonomous period and enabled.
    pub autonomous: bool,
    /// Teleop, enabled, and 30 seconds or less on the match clock.
    pub endgame: bool,
}

impl PhaseFlags {
    /// Derive the phase flags from the current tick.
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let driver_station = snapshot.table(DRIVER_STATION_TABLE);
        let match_time = driver_station.get_int(MATCH_TIME, 0);
        let enabled = driver_station.get_bool(ENABLED, false);
        let autonomous = driver_station.get_bool(AUTONOMOUS, false);
        Self {
            autonomous: autonomous && enabled,
            endgame: !autonomous && enabled && match_time <= ENDGAME_WINDOW_SECONDS,
        }
    }
}

/// True when the driver station reports a red alliance assignment.
///
/// Alliance stations 0-2 are the red side, 3-5 the blue side; an absent
/// channel defaults to blue.
pub fn is_red_alliance(snapshot: &Snapshot) -> bool {
    snapshot
        .table(DRIVER_STATION_TABLE)
        .get_int(ALLIANCE_STATION, 3)
        <= 2
}

/// Strict containment of a pose in an axis-aligned rectangle.
fn pose_in_area(pose: Pose2d, bottom_left: Translation2d, top_right: Translation2d) -> bool {
    pose.x() > bottom_left.x
        && pose.x() < top_right.x
        && pose.y() > bottom_left.y
        && pose.y() < top_right.y
}

/// Per-log charge-station result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeStationReport {
    /// A balance-named auto routine ended with the robot pitched on the
    /// station. One-shot: never reset once set within a log.
    pub attempted_charge: bool,
    /// The selected auto routine's name matched a balance keyword.
    pub maybe_balance_path: bool,
}

/// Detects an autonomous charge-station balance attempt.
#[derive(Debug, Clone, Default)]
pub struct ChargeStation {
    /// Field geometry and thresholds used for the detection.
    pub field: FieldGeometry,
}

impl ChargeStation {
    /// Create a detector for the given field geometry.
    pub fn new(field: FieldGeometry) -> Self {
        Self { field }
    }

    /// Normalize a pose into the blue-relative common frame.
    ///
    /// Red-alliance poses are expressed relative to the flip origin so the
    /// geometric checks below are alliance-agnostic.
    pub fn common_frame_pose(&self, snapshot: &Snapshot) -> Pose2d {
        let pose = snapshot
            .table(REAL_OUTPUTS_TABLE)
            .table(ODOMETRY_TABLE)
            .get_pose(ROBOT_2D, Pose2d::default());
        if is_red_alliance(snapshot) {
            pose.relative_to(self.field.flip_origin)
        } else {
            pose
        }
    }

    /// True when the pose sits strictly inside the station footprint.
    pub fn is_on_station(&self, pose: Pose2d) -> bool {
        pose_in_area(
            pose,
            self.field.station_bottom_left,
            self.field.station_top_right,
        )
    }

    /// On the station with |pitch| at or past the attempt threshold.
    pub fn is_attempting(&self, pose: Pose2d, pitch_deg: f64) -> bool {
        self.is_on_station(pose) && pitch_deg.abs() >= self.field.attempt_pitch_deg
    }

    /// On the station with |pitch| inside the balanced band.
    pub fn is_balanced(&self, pose: Pose2d, pitch_deg: f64) -> bool {
        self.is_on_station(pose) && pitch_deg.abs() <= self.field.balanced_pitch_deg
    }
}

impl Statistic for ChargeStation {
    type Output = ChargeStationReport;
    type State = ChargeStationReport;

    fn begin(&self) -> ChargeStationReport {
        ChargeStationReport::default()
    }

    fn observe(&self, state: &mut ChargeStationReport, snapshot: &Snapshot) {
        let phase = PhaseFlags::from_snapshot(snapshot);
        let match_time = snapshot
            .table(DRIVER_STATION_TABLE)
            .get_int(MATCH_TIME, 0);

        // An absent gyro reads as infinite pitch, which can never pass the
        // on-station gate with the default pose.
        let pitch_deg = snapshot
            .table(GYRO_TABLE)
            .get_double(PITCH_POSITION_DEG, f64::INFINITY);
        let pose = self.common_frame_pose(snapshot);

        if phase.autonomous && match_time <= AUTO_END_WINDOW_SECONDS {
            let selector = snapshot
                .table(DASHBOARD_INPUTS_TABLE)
                .get_string(AUTO_SELECTOR, "");
            let selector = selector.to_lowercase();
            let balance_path = BALANCE_PATH_KEYWORDS
                .iter()
                .any(|keyword| selector.contains(keyword));

            if balance_path {
                state.maybe_balance_path = true;
            }
            if balance_path && self.is_attempting(pose, pitch_deg) && !state.attempted_charge {
                state.attempted_charge = true;
            }
        }
    }

    fn finish(&self, state: ChargeStationReport, _snapshot: &Snapshot) -> ChargeStationReport {
        state
    }
}
