// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the patch engine. Runs a small guarded script
// against a synthetic source file to measure the per-apply cost of the
// literal and regex paths.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use sitewerk_patch::{PatchEngine, PatchScript, PatchStep};

/// Benchmark a mixed literal/regex script on a ~40 KB synthetic document.
///
/// The document repeats a component-like block so that literal steps hit
/// many occurrences and the guard on the first step never fires (worst case:
/// every step does real work on every apply).
fn bench_apply_mixed_script(c: &mut Criterion) {
    let block = "import { useState } from 'react';\n\
                 const [count, setCount] = useState(0);\n\
                 // TODO(v1.2): remove legacy colour prop\n";
    let document: String = block.repeat(400);

    let script = PatchScript::new(vec![
        PatchStep::literal("useState(0)", "useState<number>(0)").with_guard("useState<number>"),
        PatchStep::literal("colour", "color"),
        PatchStep::pattern(r"v(\d+)\.(\d+)", "v$1_$2"),
    ]);
    let engine = PatchEngine::new(script).expect("script compiles");

    c.bench_function("patch_apply (3 steps, 40KB)", |b| {
        b.iter(|| {
            let outcome = engine.apply(black_box(&document));
            black_box(outcome.text);
        });
    });
}

criterion_group!(benches, bench_apply_mixed_script);
criterion_main!(benches);
