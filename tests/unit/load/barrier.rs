use super::*;

#[test]
fn fires_once_after_all_distinct_completions_in_any_order() {
    let mut b = LoadBarrier::new(5, 5);
    let order = [3u32, 0, 4, 1, 2];
    let mut fired = 0;
    for (n, i) in order.iter().enumerate() {
        match b.record(FrameIndex(*i)).unwrap() {
            Settle::Ready => {
                fired += 1;
                assert_eq!(n, order.len() - 1, "fired before the last completion");
            }
            Settle::Counted { settled, expected } => {
                assert_eq!(settled as usize, n + 1);
                assert_eq!(expected, 5);
            }
            Settle::Ignored => panic!("unexpected ignore"),
        }
    }
    assert_eq!(fired, 1);
    assert!(b.is_ready());
    assert_eq!(b.record(FrameIndex(2)).unwrap(), Settle::Ignored);
}

#[test]
fn duplicates_do_not_advance_the_count() {
    let mut b = LoadBarrier::new(3, 3);
    b.record(FrameIndex(0)).unwrap();
    assert_eq!(b.record(FrameIndex(0)).unwrap(), Settle::Ignored);
    assert_eq!(b.record(FrameIndex(0)).unwrap(), Settle::Ignored);
    assert_eq!(b.settled(), 1);
    assert_eq!(b.state(), BarrierState::Loading);
}

#[test]
fn single_expected_completion() {
    let mut b = LoadBarrier::new(80, 1);
    assert_eq!(b.record(FrameIndex(79)).unwrap(), Settle::Ready);
    assert_eq!(b.expected(), 1);
}

#[test]
fn out_of_range_completion_is_an_error() {
    let mut b = LoadBarrier::new(2, 2);
    assert!(b.record(FrameIndex(2)).is_err());
    assert_eq!(b.settled(), 0);
}
