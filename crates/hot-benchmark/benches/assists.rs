use std::hint::black_box;

use codspeed_criterion_compat::{Criterion, criterion_group, criterion_main};
use hot_assists::{AssistConfig, AssistEdit, apply, assists};
use hot_ide::Analysis;
use text_size::{TextRange, TextSize};
use tokio_util::sync::CancellationToken;

fn extract_offset(text: &str) -> (TextSize, String) {
    let marker = "$0";
    let pos = text.find(marker).expect("Cursor marker not found");
    let new_text = format!("{}{}", &text[..pos], &text[pos + marker.len()..]);
    (TextSize::from(pos as u32), new_text)
}

const FIXTURE: &str = r#"
using System;
using System.Collections.Generic;
using Microsoft.Extensions.Logging;
using Newtonsoft.Json;
using System.Linq;

namespace Company.Product
{
    public class Outer
    {
        private int counter;

        public void Run() { counter++; }

        /* keep */ public /* me */ private sealed class $0Inner : IDisposable
        {
            public void Dispose() { }
        }
    }
}
"#;

fn benchmark_assists(c: &mut Criterion) {
    let (offset, text) = extract_offset(FIXTURE);
    let tree = hot_parse::parse(&text).into_tree();
    let config = AssistConfig::default();
    let range = TextRange::empty(offset);

    c.bench_function("compute_actions", |b| {
        b.iter(|| black_box(assists(&config, &tree, range)));
    });

    c.bench_function("apply_change_accessibility", |b| {
        let edit = AssistEdit::ChangeAccessibility { target: hot_assists::Accessibility::Internal };
        b.iter(|| black_box(apply(&config, &tree, range, edit)));
    });

    c.bench_function("apply_separate_using_groups", |b| {
        b.iter(|| black_box(apply(&config, &tree, range, AssistEdit::SeparateUsingGroups)));
    });
}

fn benchmark_resolve_edit(c: &mut Criterion) {
    let (offset, text) = extract_offset(FIXTURE);
    let analysis = Analysis::default();
    let file = analysis.add_file("Bench.cs", text);
    let range = TextRange::empty(offset);
    let cancel = CancellationToken::new();
    let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();

    c.bench_function("resolve_edit", |b| {
        let edit = AssistEdit::ChangeAccessibility { target: hot_assists::Accessibility::Private };
        b.iter(|| {
            let edit = runtime.block_on(analysis.resolve_edit(file, range, edit, &cancel));
            black_box(edit.unwrap());
        });
    });
}

criterion_group!(benches, benchmark_assists, benchmark_resolve_edit);
criterion_main!(benches);
