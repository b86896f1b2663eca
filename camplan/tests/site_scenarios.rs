//! End-to-end planning scenarios over whole site plans

use approx::assert_relative_eq;
use camplan::optics::{compute_distances, DoriBand};
use camplan::sizing::{
    analyze_network, analyze_storage, compute_bitrate, PoeInput, RaidLevel, SizingPolicy,
    StorageInput,
};
use camplan::{PlannedCamera, SitePlan, SiteReport};
use camplan_types::{
    CameraSpec, CanvasPoint, Codec, PoeStandard, RecordingMode, SceneComplexity, StreamSpec,
};

/// Eight cameras around a 600x400 px (60x40 m) warehouse floor
fn warehouse_plan() -> SitePlan {
    let mounts = [
        (0.0, 0.0, 45.0),
        (300.0, 0.0, 90.0),
        (600.0, 0.0, 135.0),
        (600.0, 200.0, 180.0),
        (600.0, 400.0, 225.0),
        (300.0, 400.0, 270.0),
        (0.0, 400.0, 315.0),
        (0.0, 200.0, 0.0),
    ];

    let mut plan = SitePlan::new(600.0, 400.0);
    plan.name = "Warehouse".to_string();
    for (i, &(x, y, rotation)) in mounts.iter().enumerate() {
        let camera = CameraSpec::new(CanvasPoint::new(x, y), rotation, 100.0, 30.0)
            .with_name(format!("Cam {}", i + 1))
            .with_optics(1520, 2.8, "1/2.7\"");
        let stream = StreamSpec::new(4.0, 15.0, Codec::H265, SceneComplexity::Medium);
        plan = plan.with_camera(
            PlannedCamera::new(camera)
                .with_stream(stream, RecordingMode::Continuous)
                .with_poe(PoeInput::new(PoeStandard::Poe, Some(9.0)))
                .with_cable_run(35.0 + 8.0 * i as f64),
        );
    }
    plan
}

#[test]
fn warehouse_report_is_consistent() {
    let plan = warehouse_plan();
    let report = SiteReport::build(&plan).unwrap();

    // 4 MP H.265 at 15 fps: 4096 * 0.5 * 0.5
    for camera in &report.cameras {
        assert_eq!(camera.bitrate_kbps, 1024);
        assert!(camera.dori.is_some());
    }
    assert_relative_eq!(report.network.total_mbps, 8.0);
    assert_eq!(report.network.switch_recommendation, "Gigabit Switch");

    assert!(report.coverage.total_coverage_percent > 50.0);
    assert!(report.coverage.total_coverage_percent <= 100.0);
    assert!(report.coverage.redundant_coverage_percent <= report.coverage.total_coverage_percent);
    assert_eq!(report.coverage.sample_count, 60 * 40);

    assert_eq!(report.poe.switch_recommendation, "8-port PoE switch");
    assert_eq!(report.nvr.cpu_cores, 4);
    assert!(report.cabling.over_length_runs.is_empty());
}

#[test]
fn report_is_repeatable() {
    let plan = warehouse_plan();
    let first = SiteReport::build(&plan).unwrap();
    let second = SiteReport::build(&plan).unwrap();
    assert_eq!(first, second);
}

#[test]
fn plan_file_round_trip_produces_same_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("warehouse.json");

    let plan = warehouse_plan();
    plan.save_to_file(&path).unwrap();
    let loaded = SitePlan::load_from_file(&path).unwrap();

    assert_eq!(
        SiteReport::build(&loaded).unwrap(),
        SiteReport::build(&plan).unwrap()
    );
}

#[test]
fn finer_sampling_keeps_coverage_close() {
    let mut plan = warehouse_plan();
    let coarse = SiteReport::build(&plan).unwrap().coverage;
    plan.coverage.sample_step_px = 5.0;
    let fine = SiteReport::build(&plan).unwrap().coverage;

    assert_eq!(fine.sample_count, 4 * coarse.sample_count);
    assert!((fine.total_coverage_percent - coarse.total_coverage_percent).abs() < 5.0);
}

#[test]
fn motion_recording_storage_scenario() {
    let policy = SizingPolicy::default();
    let stream = StreamSpec::default().with_bitrate_kbps(2048);
    let bitrate = compute_bitrate(&stream, &policy.bitrate);

    let storage = analyze_storage(
        &[StorageInput::new(bitrate, RecordingMode::Motion)],
        30,
        &policy.storage,
    );
    assert_relative_eq!(storage.daily_gb, 6.328125, epsilon = 1e-9);
    assert_relative_eq!(storage.total_storage_gb, 189.84375, epsilon = 1e-9);
    assert_eq!(storage.raid.level, RaidLevel::Raid1);
}

#[test]
fn ten_8mbps_cameras_fit_gigabit() {
    let streams = vec![StreamSpec::default().with_bitrate_kbps(8192); 10];
    let network = analyze_network(&streams, &SizingPolicy::default());
    assert_relative_eq!(network.total_mbps, 80.0);
    assert_eq!(network.switch_recommendation, "Gigabit Switch");
}

#[test]
fn dori_band_lookup_matches_distances() {
    let result = compute_distances(1080, 4.0, Some("1/3\""));
    for band in DoriBand::ALL {
        assert_eq!(
            camplan::optics::level_at_distance(result.distance(band), &result),
            Some(band)
        );
    }
}

#[test]
fn demo_plan_loads_and_reports() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../demos/warehouse.json");
    let plan = SitePlan::load_from_file(&path).unwrap();
    assert_eq!(plan.cameras.len(), 4);
    assert_relative_eq!(plan.policy.storage.filesystem_overhead, 0.2);
    assert_eq!(plan.cameras[3].poe.poe_standard, PoeStandard::Poe);

    let report = SiteReport::build(&plan).unwrap();
    assert_eq!(report.cameras[3].bitrate_kbps, 3072);
    assert_eq!(report.cabling.over_length_runs, vec![1]);
    assert_eq!(report.poe.switch_class, Some(PoeStandard::PoePlus));
    assert_eq!(report.poe.switch_recommendation, "8-port PoE+ switch");
}
