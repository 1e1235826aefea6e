use gamecord::core::{render, Game, InputQueue, Screen, Snake, Wander};
use gamecord::types::Symbol;

#[test]
fn render_column_major_screen() {
    let screen = Screen::from_columns(vec![vec!["a", "b"], vec!["c", "d"]]).unwrap();
    assert_eq!(render(&screen, "T", "F"), "T\nac\nbd\n\nF");
}

#[test]
fn render_has_title_rows_blank_and_footer() {
    let screen = Screen::new(3, 4, Symbol::from("⬛"));
    let text = render(&screen, "Title", "Footer");
    let lines: Vec<&str> = text.split('\n').collect();

    assert_eq!(lines.len(), 4 + 3);
    assert_eq!(lines[0], "Title");
    assert!(lines[1..5].iter().all(|l| *l == "⬛⬛⬛"));
    assert_eq!(lines[5], "");
    assert_eq!(lines[6], "Footer");
    assert_eq!(text.split('\n').filter(|l| !l.is_empty()).count(), 4 + 2);
}

fn first_frame<G: Game>(game: &mut G) -> String {
    let (w, h) = game.screen_size();
    let mut screen = Screen::new(w, h, game.background());
    game.set_over(false);
    game.update(&InputQueue::new());
    game.draw(&mut screen);
    render(&screen, &game.title(), &game.footer())
}

#[test]
fn demo_games_render_their_full_grid() {
    let text = first_frame(&mut Wander::new(3));
    let (w, h) = Wander::new(3).screen_size();
    let rows: Vec<&str> = text.lines().skip(1).take(h).collect();
    assert_eq!(rows.len(), h);
    assert!(rows.iter().all(|r| r.chars().count() >= w));

    let text = first_frame(&mut Snake::new(3));
    let (_, h) = Snake::new(3).screen_size();
    assert_eq!(text.lines().count(), h + 3);
}
