use divan::AllocProfiler;

#[global_allocator]
static ALLOC: AllocProfiler = AllocProfiler::system();

fn main() {
    divan::main();
}

pub mod codec {
    use divan::Bencher;
    use fa_lz10::{compress, decompress};

    fn get_input() -> Vec<u8> {
        // Name-table-shaped corpus: null-terminated paths with shared prefixes.
        let mut input = Vec::new();
        for dir in ["chara", "map", "effect", "sound", "script"] {
            for i in 0..400 {
                input.extend_from_slice(dir.as_bytes());
                input.extend_from_slice(format!("/entry_{i:04}.bin").as_bytes());
                input.push(0);
            }
        }
        input
    }

    #[divan::bench]
    fn compress_names(bencher: Bencher) {
        bencher.with_inputs(get_input).bench_refs(|data| {
            divan::black_box(compress(data).unwrap());
        });
    }

    #[divan::bench]
    fn decompress_names(bencher: Bencher) {
        bencher
            .with_inputs(|| compress(&get_input()).unwrap())
            .bench_refs(|data| {
                divan::black_box(decompress(data).unwrap());
            });
    }
}
