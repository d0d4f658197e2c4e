use dash_dump::{
    dash::{
        selector::{best_adaptation_set, best_bandwidth, best_representation},
        Manifest, PlanOptions, SegmentPlan, TimelineCoverage,
    },
    DumpError,
};

use crate::{fixture, AssertWrapper};

const EXAMPLE_MPD: &str = "https://example.com/dash/example.mpd";
const FILE_MPD: &str = "https://example.com/dash/file.mpd";

fn plan_urls(manifest: &Manifest, options: PlanOptions) -> Vec<String> {
    SegmentPlan::new(manifest, options)
        .assert_success()
        .segments()
        .map(|s| s.assert_success().url.to_string())
        .collect()
}

#[test]
fn test_manifest_audio() {
    let m = Manifest::parse(EXAMPLE_MPD, &fixture("1.xml")).assert_success();

    let audio = m.audio("ita").assert_success();
    assert_eq!(audio.lang.as_deref(), Some("ita"));
    let audio = m.audio("eng").assert_success();
    assert_eq!(audio.lang.as_deref(), Some("eng"));
    m.audio("deu").assert_error();
}

#[test]
fn test_manifest_segment_url() {
    let m = Manifest::parse(EXAMPLE_MPD, &fixture("1.xml")).assert_success();

    let audio = m.audio("ita").assert_success();
    let repr = &audio.representations[0];
    let bandwidth = repr.bandwidth.assert_success();

    let url = m.segment_url(audio, 0, bandwidth, 0, repr).assert_success();
    assert_eq!(
        url.as_str(),
        "https://example.com/dash/QualityLevels(96000)/Fragments(audio_482_ita=Init)"
    );

    let url = m
        .segment_url(audio, 39456133248533, bandwidth, 1, repr)
        .assert_success();
    assert_eq!(
        url.as_str(),
        "https://example.com/dash/QualityLevels(96000)/Fragments(audio_482_ita=39456133248533)"
    );

    let video = m.video("ita").assert_success();
    let (bandwidth, best) = best_bandwidth(Some(video));
    assert_eq!(bandwidth, 3_200_000);
    assert_eq!(
        best.and_then(|r| r.id.as_deref()),
        Some("video=3200000")
    );

    let url = m
        .segment_url(video, 0, bandwidth, 0, best.assert_success())
        .assert_success();
    assert_eq!(
        url.as_str(),
        "https://example.com/dash/QualityLevels(3200000)/Fragments(video=Init)"
    );
}

#[test]
fn test_best_video_selection() {
    let m = Manifest::parse(EXAMPLE_MPD, &fixture("1.xml")).assert_success();

    let videos = m.video_adaptation_sets(0).assert_success();
    assert_eq!(videos.len(), 2);

    let best = best_adaptation_set(videos.iter().copied()).assert_success();
    assert_eq!(best.maxWidth, Some(1920));
    // selection is stable across runs
    let again = best_adaptation_set(videos.iter().copied()).assert_success();
    assert!(std::ptr::eq(best, again));

    let repr = best_representation(best).assert_success();
    assert_eq!(repr.id.as_deref(), Some("video=3200000"));
    assert_eq!((repr.width, repr.height), (Some(1920), Some(1080)));
}

#[test]
fn test_period_out_of_range() {
    let m = Manifest::parse("https://example.com/vod/manifest.mpd", &fixture("2.xml"))
        .assert_success();

    assert_eq!(m.periods.len(), 2);
    assert!(matches!(
        m.video_adaptation_sets(5),
        Err(DumpError::PeriodOutOfRange {
            period: 5,
            periods: 2
        })
    ));

    let options = PlanOptions {
        period: 5,
        ..Default::default()
    };
    assert!(matches!(
        SegmentPlan::new(&m, options),
        Err(DumpError::PeriodOutOfRange { .. })
    ));
}

#[test]
fn test_media_untagged_short_circuit() {
    let m = Manifest::parse("https://example.com/vod/manifest.mpd", &fixture("2.xml"))
        .assert_success();

    // the untagged intro video matches any language
    let video = m.video("fr").assert_success();
    assert_eq!(video.maxWidth, Some(640));
    m.audio("fr").assert_error();
    m.audio("en").assert_success();
}

#[test]
fn test_plan_timeline() {
    let m = Manifest::parse(FILE_MPD, &fixture("1.xml")).assert_success();
    let plan = SegmentPlan::new(&m, PlanOptions::default()).assert_success();

    assert_eq!(plan.bandwidth(), 3_200_000);
    assert_eq!(plan.resolution(), Some((1920, 1080)));
    assert_eq!(plan.representation().id.as_deref(), Some("video=3200000"));

    assert_eq!(
        plan_urls(&m, PlanOptions::default()),
        vec![
            "https://example.com/dash/QualityLevels(3200000)/Fragments(video=Init)",
            "https://example.com/dash/QualityLevels(3200000)/Fragments(video=16440052800000000)",
            "https://example.com/dash/QualityLevels(3200000)/Fragments(video=16440052840000000)",
            "https://example.com/dash/QualityLevels(3200000)/Fragments(video=16440052880000000)",
            "https://example.com/dash/QualityLevels(3200000)/Fragments(video=16440052920000000)",
        ]
    );
}

#[test]
fn test_plan_numbers_and_times() {
    let m = Manifest::parse(FILE_MPD, &fixture("1.xml")).assert_success();
    let plan = SegmentPlan::new(&m, PlanOptions::default()).assert_success();

    let segments: Vec<_> = plan.segments().map(|s| s.assert_success()).collect();
    assert!(segments[0].is_initialization());
    assert!(segments[1..].iter().all(|s| !s.is_initialization()));

    let numbers: Vec<_> = segments.iter().map(|s| s.number).collect();
    assert_eq!(numbers, vec![0, 0, 1, 2, 3]);

    for pair in segments[1..].windows(2) {
        assert_eq!(pair[1].time - pair[0].time, 40_000_000);
    }
}

#[test]
fn test_plan_duration_mode() {
    let m = Manifest::parse("https://example.com/vod/manifest.mpd", &fixture("2.xml"))
        .assert_success();

    let options = PlanOptions {
        period: 1,
        ..Default::default()
    };
    let plan = SegmentPlan::new(&m, options).assert_success();
    assert_eq!(plan.adaptation_set().maxWidth, Some(1920));
    assert_eq!(plan.representation().id.as_deref(), Some("1080p"));
    assert_eq!(plan.bandwidth(), 5_000_000);

    assert_eq!(
        plan_urls(&m, options),
        vec![
            "https://example.com/vod/main/1080p/init.mp4",
            "https://example.com/vod/main/1080p/00001.m4s?t=4000",
            "https://example.com/vod/main/1080p/00002.m4s?t=8000",
            "https://example.com/vod/main/1080p/00003.m4s?t=12000",
        ]
    );

    assert_eq!(
        plan_urls(&m, PlanOptions::default()),
        vec![
            "https://example.com/vod/intro/intro-360p/init.mp4",
            "https://example.com/vod/intro/intro-360p/1.m4s",
        ]
    );
}

const MULTI_ENTRY_MPD: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<MPD xmlns="urn:mpeg:dash:schema:mpd:2011" type="static" mediaPresentationDuration="PT10S">
  <Period>
    <AdaptationSet contentType="video" mimeType="video/mp4" maxWidth="1280" maxHeight="720">
      <SegmentTemplate timescale="1000" presentationTimeOffset="500" media="v/$Time$.m4s" initialization="v/init.mp4">
        <SegmentTimeline>
          <S t="500" d="2000" r="1"/>
          <S d="1000"/>
          <S t="9000" d="1500" r="1"/>
        </SegmentTimeline>
      </SegmentTemplate>
      <Representation id="v" bandwidth="1000000" width="1280" height="720"/>
    </AdaptationSet>
  </Period>
</MPD>"#;

#[test]
fn test_plan_first_entry_only() {
    let m = Manifest::parse(FILE_MPD, MULTI_ENTRY_MPD).assert_success();

    assert_eq!(
        plan_urls(&m, PlanOptions::default()),
        vec![
            "https://example.com/dash/v/init.mp4",
            "https://example.com/dash/v/500.m4s",
            "https://example.com/dash/v/2500.m4s",
        ]
    );
}

#[test]
fn test_plan_complete_timeline() {
    let m = Manifest::parse(FILE_MPD, MULTI_ENTRY_MPD).assert_success();
    let options = PlanOptions {
        timeline: TimelineCoverage::Complete,
        ..Default::default()
    };

    assert_eq!(
        plan_urls(&m, options),
        vec![
            "https://example.com/dash/v/init.mp4",
            "https://example.com/dash/v/500.m4s",
            "https://example.com/dash/v/2500.m4s",
            "https://example.com/dash/v/4500.m4s",
            "https://example.com/dash/v/9000.m4s",
            "https://example.com/dash/v/10500.m4s",
        ]
    );
}

#[test]
fn test_plan_missing_segment_template() {
    let xml = r#"<MPD xmlns="urn:mpeg:dash:schema:mpd:2011" type="static">
  <Period>
    <AdaptationSet contentType="video" maxWidth="1280" maxHeight="720">
      <Representation id="v" bandwidth="1000000" width="1280" height="720"/>
    </AdaptationSet>
  </Period>
</MPD>"#;
    let m = Manifest::parse(FILE_MPD, xml).assert_success();

    assert!(matches!(
        SegmentPlan::new(&m, PlanOptions::default()),
        Err(DumpError::MissingSegmentTemplate)
    ));
}

#[test]
fn test_plan_without_video() {
    let xml = r#"<MPD xmlns="urn:mpeg:dash:schema:mpd:2011" type="static">
  <Period>
    <AdaptationSet contentType="audio" lang="en">
      <Representation id="a" bandwidth="128000"/>
    </AdaptationSet>
  </Period>
</MPD>"#;
    let m = Manifest::parse(FILE_MPD, xml).assert_success();

    assert!(matches!(
        SegmentPlan::new(&m, PlanOptions::default()),
        Err(DumpError::NoCandidate(_))
    ));
}

#[test]
fn test_plan_is_lazy() {
    let xml = r#"<MPD xmlns="urn:mpeg:dash:schema:mpd:2011" type="static">
  <Period>
    <AdaptationSet contentType="video" maxWidth="1280" maxHeight="720">
      <SegmentTemplate media="$Number$.m4s" initialization="init.mp4" duration="4000000000"/>
      <Representation id="v" bandwidth="1000000" width="1280" height="720"/>
    </AdaptationSet>
  </Period>
</MPD>"#;
    let m = Manifest::parse(FILE_MPD, xml).assert_success();
    let plan = SegmentPlan::new(&m, PlanOptions::default()).assert_success();

    let urls: Vec<_> = plan
        .segments()
        .take(3)
        .map(|s| s.assert_success().url.to_string())
        .collect();
    assert_eq!(
        urls,
        vec![
            "https://example.com/dash/init.mp4",
            "https://example.com/dash/1.m4s",
            "https://example.com/dash/2.m4s",
        ]
    );
}

#[test]
fn test_summary() {
    let m = Manifest::parse(EXAMPLE_MPD, &fixture("1.xml")).assert_success();
    let summary = m.summary();

    assert_eq!(summary.periods.len(), 1);
    let period = &summary.periods[0];
    assert_eq!(period.duration, Some(16.0));
    assert_eq!(period.adaptation_sets.len(), 4);

    let video = &period.adaptation_sets[2];
    assert_eq!(video.content_type.as_deref(), Some("video"));
    assert_eq!(
        video.timeline_ends,
        vec![16_440_052_800_000_000 + 4 * 40_000_000]
    );
    assert_eq!(video.timescale, Some(10_000_000));
    assert_eq!(video.representations.len(), 3);

    let text = summary.to_string();
    assert!(text.contains("Period 0:"));
    assert!(text.contains("Lang: ita"));
    assert!(text.contains("ID: video=3200000"));
    assert!(text.contains("Resolution: 1920x1080"));

    let json = serde_json::to_value(&summary).assert_success();
    assert_eq!(json["base_url"], EXAMPLE_MPD);
    assert_eq!(
        json["periods"][0]["adaptation_sets"][0]["representations"][0]["bandwidth"],
        96000
    );
}
