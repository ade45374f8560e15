use std::hint::black_box;

use criterion::{criterion_group, BatchSize, Criterion};
use sqlshell::format::{format_row, Mode};
use sqlshell::value::{Nullable, NullablePayload, Value};

fn sample_row() -> Vec<Value> {
    vec![
        Value::from(42_i64),
        Value::from(1.25_f64),
        Value::from("a moderately long piece of text"),
        Value::Null,
        Value::Nullable(Nullable::valid(NullablePayload::Int32(7))),
        Value::Bytes((0..=255).collect()),
        Value::encoded_blob("3q2+7w"),
    ]
}

fn format_display(c: &mut Criterion) {
    let row = sample_row();
    c.bench_function("format_row_display", |b| {
        b.iter(|| format_row(black_box(&row), Mode::Display).unwrap());
    });
}

fn format_sql_literal(c: &mut Criterion) {
    c.bench_function("format_row_sql_literal", |b| {
        b.iter_batched(
            sample_row,
            |row| format_row(&row, Mode::SqlLiteral).unwrap(),
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(format, format_display, format_sql_literal);
