//! Benchmarks for track selection
//!
//! Tests performance of classifying tracks and building strip plans.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mkvstrip::languages::LanguageSet;
use mkvstrip::planner::build_plan;
use mkvstrip::selection::{classify, FileSelection};
use mkvstrip_av::{MediaInfo, Track, TrackType, Workspace};
use std::path::PathBuf;

const LANGUAGES: [&str; 8] = ["eng", "fre", "ger", "spa", "ita", "jpn", "por", "und"];

/// Create a file with one video track and `per_type` audio and subtitle
/// tracks cycling through the language list.
fn media(per_type: usize) -> MediaInfo {
    let mut tracks = vec![Track::new(0u64, TrackType::Video, "HEVC/H.265/MPEG-H", None)];
    for i in 0..per_type {
        let lang = LANGUAGES[i % LANGUAGES.len()];
        tracks.push(Track::new((1 + i) as u64, TrackType::Audio, "E-AC-3", Some(lang)));
    }
    for i in 0..per_type {
        let lang = LANGUAGES[i % LANGUAGES.len()];
        let track = Track::new(
            (1 + per_type + i) as u64,
            TrackType::Subtitle,
            "SubRip/SRT",
            Some(lang),
        );
        let track = if i % 4 == 3 {
            track.with_name("Commentary")
        } else {
            track
        };
        tracks.push(track);
    }

    MediaInfo {
        file_path: PathBuf::from("/movies/movie.mkv"),
        tracks,
    }
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    let wanted = LanguageSet::parse_csv("eng,jpn,und");

    for per_type in [2, 8, 32] {
        let info = media(per_type);
        group.bench_with_input(
            BenchmarkId::new("audio", per_type),
            &info,
            |b, info| {
                b.iter(|| {
                    classify(
                        black_box(&info.tracks),
                        TrackType::Audio,
                        black_box(&wanted),
                        false,
                    )
                });
            },
        );
        group.bench_with_input(
            BenchmarkId::new("subtitle_commentary", per_type),
            &info,
            |b, info| {
                b.iter(|| {
                    classify(
                        black_box(&info.tracks),
                        TrackType::Subtitle,
                        black_box(&wanted),
                        true,
                    )
                });
            },
        );
    }

    group.finish();
}

fn bench_plan(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan");
    let wanted = LanguageSet::parse_csv("eng,und");
    let workspace = Workspace::new("/movies/movie.mkv").unwrap();

    for per_type in [2, 32] {
        let info = media(per_type);
        group.bench_with_input(
            BenchmarkId::new("select_and_plan", per_type),
            &info,
            |b, info| {
                b.iter(|| {
                    let selection = FileSelection::new(black_box(info), &wanted, &wanted, false, true);
                    build_plan(&workspace, &selection).mkvmerge_args()
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_classify, bench_plan);
criterion_main!(benches);
