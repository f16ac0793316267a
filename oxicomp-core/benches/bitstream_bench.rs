//! Bitstream benchmarks: single-bit and variable-width writes, cursor reads.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use oxicomp_core::bitstream::{BitBuffer, BitWriter};
use std::hint::black_box;

fn bench_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("bitwriter");

    for size in [1024usize, 65536] {
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("write_bit", size), &size, |b, &size| {
            b.iter(|| {
                let mut writer = BitWriter::new(Vec::with_capacity(size + 1));
                for i in 0..size * 8 {
                    writer.write_bit((i & 1) as u8).unwrap();
                }
                writer.flush(true).unwrap();
                black_box(writer.into_inner())
            });
        });

        group.bench_with_input(BenchmarkId::new("write_bits_9", size), &size, |b, &size| {
            b.iter(|| {
                let mut writer = BitWriter::new(Vec::with_capacity(size + 1));
                for i in 0..(size * 8 / 9) as u32 {
                    writer.write_bits(i & 0x1FF, 9).unwrap();
                }
                writer.flush(true).unwrap();
                black_box(writer.into_inner())
            });
        });
    }

    group.finish();
}

fn bench_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("bitcursor");

    for size in [1024usize, 65536] {
        let data: Vec<u8> = (0..size).map(|i| (i * 31) as u8).collect();
        let buffer = BitBuffer::from_bytes(data);
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("read_bits_9", size), &buffer, |b, buffer| {
            b.iter(|| {
                let mut cursor = buffer.cursor();
                let mut sum = 0u64;
                while cursor.remaining() >= 9 {
                    sum += cursor.read_bits(9).unwrap() as u64;
                }
                black_box(sum)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_write, bench_read);
criterion_main!(benches);
