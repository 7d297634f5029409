mod common;

use common::{replay_of, tick, Tick};
use matchlog_core::geometry::{Pose2d, Rotation2d};
use matchlog_core::snapshot::LogValue;
use matchlog_core::stats::{ChargeStation, ChargeStationReport, FieldGeometry, Statistic};

const POSE_KEY: &str = "RealOutputs/Odometry/Robot2d";
const PITCH_KEY: &str = "Gyro/PitchPositionDeg";
const SELECTOR_KEY: &str = "DashboardInputs/AutoSelector";

/// Center of the charge station in the blue-relative frame.
const ON_STATION: [f64; 3] = [3.5, 2.5, 0.0];
const OFF_STATION: [f64; 3] = [10.0, 2.5, 0.0];

struct TickSpec {
    timestamp_us: u64,
    pose: [f64; 3],
    pitch_deg: f64,
    match_time: i64,
    autonomous: bool,
    enabled: bool,
    alliance_station: i64,
    selector: &'static str,
}

impl Default for TickSpec {
    fn default() -> Self {
        Self {
            timestamp_us: 0,
            pose: OFF_STATION,
            pitch_deg: 0.0,
            match_time: 15,
            autonomous: true,
            enabled: true,
            alliance_station: 3,
            selector: "",
        }
    }
}

fn build_tick(spec: TickSpec) -> Tick {
    tick(
        spec.timestamp_us,
        &[
            (POSE_KEY, LogValue::DoubleArray(spec.pose.to_vec())),
            (PITCH_KEY, LogValue::Double(spec.pitch_deg)),
            ("DriverStation/MatchTime", LogValue::Integer(spec.match_time)),
            ("DriverStation/Autonomous", LogValue::Boolean(spec.autonomous)),
            ("DriverStation/Enabled", LogValue::Boolean(spec.enabled)),
            (
                "DriverStation/AllianceStation",
                LogValue::Integer(spec.alliance_station),
            ),
            (SELECTOR_KEY, LogValue::String(spec.selector.to_string())),
        ],
    )
}

fn compute_one(ticks: Vec<Tick>) -> ChargeStationReport {
    let mut logs = vec![replay_of(ticks)];
    let detector = ChargeStation::new(FieldGeometry::default());
    let mut results = detector.compute(&mut logs);
    results.remove(0).expect("synthetic log replays cleanly")
}

#[test]
fn pose_outside_station_never_attempts() {
    let report = compute_one(vec![build_tick(TickSpec {
        pose: OFF_STATION,
        pitch_deg: 20.0,
        match_time: 1,
        selector: "ChargeBalanceAuto",
        ..TickSpec::default()
    })]);
    assert!(!report.attempted_charge);
    // The keyword still matched, even though the attempt did not.
    assert!(report.maybe_balance_path);
}

#[test]
fn balance_auto_on_station_attempts_and_flag_sticks() {
    let trigger = build_tick(TickSpec {
        pose: ON_STATION,
        pitch_deg: 14.0,
        match_time: 1,
        selector: "ChargeAuto",
        ..TickSpec::default()
    });
    // Everything that made the trigger true is false afterwards.
    let teleop_flat = build_tick(TickSpec {
        timestamp_us: 20_000,
        pose: OFF_STATION,
        pitch_deg: 0.0,
        match_time: 100,
        autonomous: false,
        selector: "ChargeAuto",
        ..TickSpec::default()
    });

    let report = compute_one(vec![trigger, teleop_flat]);
    assert!(report.attempted_charge);
    assert!(report.maybe_balance_path);
}

#[test]
fn selector_without_balance_keywords_never_attempts() {
    let report = compute_one(vec![build_tick(TickSpec {
        pose: ON_STATION,
        pitch_deg: 14.0,
        match_time: 1,
        selector: "ScoreTwoPieceAuto",
        ..TickSpec::default()
    })]);
    assert!(!report.attempted_charge);
    assert!(!report.maybe_balance_path);
}

#[test]
fn balance_keywords_match_case_insensitively() {
    for selector in ["CHARGE STATION AUTO", "MidBalance", "bAl2"] {
        let report = compute_one(vec![build_tick(TickSpec {
            pose: ON_STATION,
            pitch_deg: 14.0,
            match_time: 1,
            selector,
            ..TickSpec::default()
        })]);
        assert!(report.attempted_charge, "selector {selector:?}");
    }
}

#[test]
fn attempt_requires_the_final_second_of_auto() {
    let report = compute_one(vec![build_tick(TickSpec {
        pose: ON_STATION,
        pitch_deg: 14.0,
        match_time: 5,
        selector: "ChargeAuto",
        ..TickSpec::default()
    })]);
    assert!(!report.attempted_charge);
}

#[test]
fn attempt_requires_autonomous_and_enabled() {
    let teleop = build_tick(TickSpec {
        pose: ON_STATION,
        pitch_deg: 14.0,
        match_time: 1,
        autonomous: false,
        selector: "ChargeAuto",
        ..TickSpec::default()
    });
    assert!(!compute_one(vec![teleop]).attempted_charge);

    let disabled = build_tick(TickSpec {
        pose: ON_STATION,
        pitch_deg: 14.0,
        match_time: 1,
        enabled: false,
        selector: "ChargeAuto",
        ..TickSpec::default()
    });
    assert!(!compute_one(vec![disabled]).attempted_charge);
}

#[test]
fn flat_robot_on_station_does_not_attempt() {
    let report = compute_one(vec![build_tick(TickSpec {
        pose: ON_STATION,
        pitch_deg: 3.0,
        match_time: 1,
        selector: "ChargeAuto",
        ..TickSpec::default()
    })]);
    assert!(!report.attempted_charge);
}

#[test]
fn red_alliance_pose_is_flipped_onto_the_station() {
    let field = FieldGeometry::default();
    // The red-side mirror of the station center.
    let red_pose = [
        field.flip_origin.x() - ON_STATION[0],
        field.flip_origin.y() - ON_STATION[1],
        ON_STATION[2] + std::f64::consts::PI,
    ];

    let report = compute_one(vec![build_tick(TickSpec {
        pose: red_pose,
        pitch_deg: 14.0,
        match_time: 1,
        alliance_station: 1,
        selector: "ChargeAuto",
        ..TickSpec::default()
    })]);
    assert!(report.attempted_charge);

    // The same red-side pose under a blue assignment is off the station.
    let report = compute_one(vec![build_tick(TickSpec {
        pose: red_pose,
        pitch_deg: 14.0,
        match_time: 1,
        alliance_station: 4,
        selector: "ChargeAuto",
        ..TickSpec::default()
    })]);
    assert!(!report.attempted_charge);
}

#[test]
fn alliance_flip_maps_mirrored_poses_to_a_common_frame() {
    let field = FieldGeometry::default();
    let tolerance = 1e-9;

    for (x, y, theta) in [(3.5, 2.5, 0.0), (1.0, 7.0, 0.75), (12.3, 0.4, -2.1)] {
        let blue = Pose2d::new(x, y, Rotation2d::new(theta));
        let red = Pose2d::new(
            field.flip_origin.x() - x,
            field.flip_origin.y() - y,
            Rotation2d::new(theta + std::f64::consts::PI),
        );
        let flipped = red.relative_to(field.flip_origin);

        assert!((flipped.x() - blue.x()).abs() < tolerance);
        assert!((flipped.y() - blue.y()).abs() < tolerance);
        assert!((flipped.rotation.radians() - blue.rotation.radians()).abs() < tolerance);
    }
}

#[test]
fn missing_channels_yield_a_quiet_report() {
    let report = compute_one(vec![tick(0, &[]), tick(20_000, &[])]);
    assert_eq!(report, ChargeStationReport::default());
}
