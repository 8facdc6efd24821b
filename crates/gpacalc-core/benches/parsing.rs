use std::path::Path;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gpacalc_core::model::{Course, CourseInput, Layout};
use gpacalc_core::parser::{build_session, parse_roster_str, validate_roster};

fn bench_course_input(c: &mut Criterion) {
    let mut group = c.benchmark_group("course_input");

    let valid = CourseInput::new("Mathematics 101", "3", "A");
    let bad_credits = CourseInput::new("Mathematics 101", "three", "A");
    let bad_grade = CourseInput::new("Mathematics 101", "3", "Z");

    group.bench_function("valid", |b| {
        b.iter(|| Course::from_input(black_box(&valid)))
    });

    group.bench_function("bad_credits", |b| {
        b.iter(|| Course::from_input(black_box(&bad_credits)))
    });

    group.bench_function("bad_grade", |b| {
        b.iter(|| Course::from_input(black_box(&bad_grade)))
    });

    group.finish();
}

fn bench_roster_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("roster_parsing");
    let path = Path::new("bench.toml");

    let small = generate_roster(2, 5);
    let large = generate_roster(40, 12);

    group.bench_function("parse/2x5", |b| {
        b.iter(|| parse_roster_str(black_box(&small), path))
    });

    group.bench_function("parse/40x12", |b| {
        b.iter(|| parse_roster_str(black_box(&large), path))
    });

    let parsed = parse_roster_str(&large, path).unwrap();

    group.bench_function("build/40x12", |b| {
        b.iter(|| build_session(black_box(&parsed), Layout::Flat))
    });

    group.bench_function("validate/40x12", |b| {
        b.iter(|| validate_roster(black_box(&parsed), Layout::Flat))
    });

    group.finish();
}

fn generate_roster(periods: usize, courses: usize) -> String {
    let mut s = String::from("[roster]\nlayout = \"flat\"\n");
    for p in 0..periods {
        s.push_str(&format!("\n[[periods]]\nname = \"Semester {}\"\n", p + 1));
        for i in 0..courses {
            let grade = ["A", "B", "C", "D", "E", "F"][(p + i) % 6];
            s.push_str(&format!(
                r#"
[[periods.courses]]
name = "COURSE {p}{i:02}"
credits = {}
grade = "{grade}"
"#,
                (i % 4) + 1
            ));
        }
    }
    s
}

criterion_group!(benches, bench_course_input, bench_roster_parsing);
criterion_main!(benches);
