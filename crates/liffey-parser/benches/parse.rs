//! Parser benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use liffey_ast::Allocator;
use liffey_parser::{parse, SourceType};

const JS_SOURCE: &str = r#"
// Sample JavaScript code for benchmarking
function fibonacci(n) {
    if (n <= 1) return n;
    return fibonacci(n - 1) + fibonacci(n - 2);
}

class Calculator {
    constructor() {
        this.result = 0;
    }

    add(x, y) {
        return x + y;
    }

    async fetchData(url) {
        const response = await fetch(url);
        return response.json();
    }
}

const calc = new Calculator();
const numbers = [1, 2, 3, 4, 5].map(n => n * 2);
const { a, b, ...rest } = { a: 1, b: 2, c: 3, d: 4 };
const template = `Hello ${name}, you have ${count} messages`;

export { Calculator, fibonacci };
export default calc;
"#;

const TSX_SOURCE: &str = r#"
interface TodoProps {
    items: string[];
    onToggle(index: number): void;
}

type Filter = "all" | "active" | "done";

const TodoList = (props: TodoProps) => (
    <ul className="todos">
        {props.items.map((item, i) => (
            <li key={i} onClick={() => props.onToggle(i)}>
                {item}
            </li>
        ))}
    </ul>
);

export default TodoList;
"#;

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    group.throughput(Throughput::Bytes(JS_SOURCE.len() as u64));
    group.bench_function("js", |b| {
        let mut allocator = Allocator::new();
        b.iter(|| {
            let result = parse(&allocator, black_box(JS_SOURCE), SourceType::Module);
            assert!(result.is_valid());
            drop(result);
            allocator.reset();
        });
    });

    group.throughput(Throughput::Bytes(TSX_SOURCE.len() as u64));
    group.bench_function("tsx", |b| {
        let mut allocator = Allocator::new();
        b.iter(|| {
            let result = parse(&allocator, black_box(TSX_SOURCE), SourceType::Tsx);
            assert!(result.is_valid());
            drop(result);
            allocator.reset();
        });
    });

    group.finish();
}

fn bench_parse_large(c: &mut Criterion) {
    // Repeat the sample to approximate a real module.
    let large: String = JS_SOURCE.repeat(50);
    let mut group = c.benchmark_group("parse_large");
    group.throughput(Throughput::Bytes(large.len() as u64));
    group.bench_function("js_50x", |b| {
        let mut allocator = Allocator::new();
        b.iter(|| {
            let result = parse(&allocator, black_box(&large), SourceType::Module);
            assert!(result.is_valid());
            drop(result);
            allocator.reset();
        });
    });
    group.finish();
}

criterion_group!(benches, bench_parse, bench_parse_large);
criterion_main!(benches);
