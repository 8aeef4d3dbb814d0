use codspeed_criterion_compat::{
    Criterion, Throughput, black_box, criterion_group, criterion_main,
};

static DECLARATIONS: &str = "
[Serializable] public sealed partial class Repository<T> : IRepository<T> where T : class { }
internal static class Extensions { public static int Count(this string s) => s.Length; }
protected internal record struct Point(int X, int Y);
private enum Color { Red = 1, Green = 2, Blue = Red | Green }
public interface IRepository<T> { T Find(int id); void Add(T item); }
";

static TRIVIA: &str = "
using System; // core
/* block
   comment */
using System.Collections.Generic;\r\n\r\n
    using   Microsoft.Extensions.Logging;   \t
/// <summary>documented</summary>
global using static System.Math;
";

static CANDIDATES: [(&str, &str); 2] = [("declarations", DECLARATIONS), ("trivia", TRIVIA)];

fn iterate(s: &str) {
    use hot_tokenizer::{SyntaxKind, Tokenizer};

    let mut tokenizer = Tokenizer::new(s);

    loop {
        let token = tokenizer.next_token();

        if token.kind == SyntaxKind::EOF {
            break;
        }

        black_box(token);
    }
}

fn bench_iterate(c: &mut Criterion) {
    let mut group = c.benchmark_group("iterate");

    for (name, source) in CANDIDATES {
        let source = source.repeat(32);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(name, &source, |b, s| b.iter(|| iterate(s)));
    }
}

criterion_group!(benches, bench_iterate);
criterion_main!(benches);
