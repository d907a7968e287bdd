use rayon::prelude::*;
use stepchart::prelude::*;

fn chart(index: usize) -> (Header, NoteGrid) {
    let mut header = Header::new();
    header.insert_segments(
        SegmentKind::Tempo,
        parse_segment_list(&format!("0={},8=99999999,9={}", 100 + index, 100 + index)).unwrap(),
    );
    header.insert_segments(SegmentKind::Stop, parse_segment_list("4=0.5").unwrap());
    header.offset_ms = index as f64 * -10.0;
    let grid = parse_note_grid(&format!(
        "{},{}",
        ["10010"; 8].join("\n"),
        ["01001"; 4].join("\n")
    ));
    (header, grid)
}

#[test]
fn repeated_compilation_is_deterministic() {
    let (header, grid) = chart(3);
    let first = compile(&header, &grid).unwrap();
    let second = compile(&header, &grid).unwrap();
    assert_eq!(first, second);
    assert_eq!(format!("{first:?}"), format!("{second:?}"));
}

#[test]
fn parallel_batches_agree_with_sequential_ones() {
    let charts: Vec<_> = (0..64).map(chart).collect();

    let sequential: Vec<_> = charts
        .iter()
        .map(|(header, grid)| compile(header, grid).unwrap())
        .collect();
    let parallel: Vec<_> = charts
        .par_iter()
        .map(|(header, grid)| compile(header, grid).unwrap())
        .collect();

    assert_eq!(sequential, parallel);
}

#[test]
fn one_bad_chart_does_not_poison_the_batch() {
    let mut charts: Vec<_> = (0..8).map(chart).collect();
    charts[3].0.bpms.insert(Beat::from_integer(2), -60.0);

    let results: Vec<_> = charts
        .par_iter()
        .map(|(header, grid)| compile(header, grid))
        .collect();

    for (index, result) in results.iter().enumerate() {
        if index == 3 {
            assert!(matches!(
                result,
                Err(ChartError::InvalidTimingSegment {
                    kind: SegmentKind::Tempo,
                    ..
                })
            ));
        } else {
            assert!(result.is_ok());
        }
    }
}
