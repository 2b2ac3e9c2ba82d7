use kelp::lang::{KelpNumber, NumberKind};
use kelp::{read, Interpreter, KelpError, KelpExpr, KelpResult, PrintHandler};
use pretty_assertions::assert_eq;

fn with_prelude() -> Interpreter {
	let ip = Interpreter::builder().default_plugins().print_handler(PrintHandler::buffer()).build();
	ip.load_prelude().unwrap();
	ip
}

fn eval(ip: &Interpreter, text: &str) -> KelpResult<KelpExpr> {
	ip.run_source(text).map(|mut v| v.pop().unwrap_or_else(KelpExpr::nil))
}

fn show(ip: &Interpreter, text: &str) -> String {
	match eval(ip, text) {
		Ok(v) => v.to_string(),
		Err(err) => panic!("`{}` failed: {}", text, err),
	}
}

#[test]
fn printed_results_read_back_equal() {
	let ip = Interpreter::new();
	for source in [
		"'(a (b \"c\") 1 2.5 ())",
		"(list 1 (+ 1 2.0) \"s\" 'sym nil)",
		"(cons 'x '(y z))",
		"(* 4 0.5)",
		"(* 10000000000 10000000000)",
	] {
		let first = eval(&ip, source).unwrap();
		let reread = read(&first.to_string()).unwrap().remove(0);
		// literals re-evaluate to themselves once quoted
		let second = eval(&ip, &format!("'{}", reread)).unwrap();
		assert_eq!(first, second, "{}", source);
	}
}

#[test]
fn nil_has_two_spellings() {
	let ip = Interpreter::new();
	assert_eq!(KelpExpr::symbol("nil"), KelpExpr::List(vec![]));
	assert_eq!(KelpExpr::List(vec![]), KelpExpr::symbol("nil"));
	assert_eq!(eval(&ip, "(atom nil)").unwrap(), KelpExpr::truth());
	assert_eq!(eval(&ip, "(null nil)").unwrap(), KelpExpr::truth());
	assert_eq!(show(&ip, "'nil"), "nil");
	assert_eq!(show(&ip, "()"), "nil");
}

#[test]
fn numeric_tags() {
	let ip = Interpreter::new();
	match eval(&ip, "(+ 1 2)").unwrap() {
		KelpExpr::Number(n) => assert_eq!((n.kind, n.value), (NumberKind::Integer, 3.0)),
		other => panic!("{:?}", other),
	}
	assert_eq!(eval(&ip, "(+ 1 2.0)").unwrap(), KelpExpr::Number(KelpNumber::float(3.0)));
	assert_eq!(show(&ip, "(+ 1 2.0)"), "3.0");
	assert!(matches!(eval(&ip, "(*)"), Err(KelpError::ArityError { .. })));
	assert!(matches!(eval(&ip, "(- 5)"), Err(KelpError::ArityError { .. })));
}

#[test]
fn quasiquote_template() {
	let ip = Interpreter::new();
	assert_eq!(show(&ip, "(define x 5) `(a ,x c)"), "(a 5 c)");
}

#[test]
fn closures_track_their_scope() {
	let ip = Interpreter::new();
	assert_eq!(show(&ip, "(define y 10) (define f (lambda (z) (+ z y))) (call f 5)"), "15");
	assert_eq!(show(&ip, "(set! y 100) (call f 5)"), "105");
	// a counter over its own captured scope
	assert_eq!(show(&ip, "
		(define make-counter (lambda () (begin (define n 0) (lambda () (set! n (+ n 1))))))
		(define c (make-counter))
		(c) (c)
		(define other (make-counter))
		(other)
		(list (c) (other))"), "(3 2)");
	assert!(!ip.global().exists("n"));
}

#[test]
fn macros_see_only_their_arguments() {
	let ip = Interpreter::new();
	let err = eval(&ip, "(define free 1) (define m (macro (a) (list a free))) (m 2)").unwrap_err();
	assert_eq!(err, KelpError::UndefinedVariable { name: "free".into() });
}

#[test]
fn list_edges() {
	let ip = Interpreter::new();
	assert_eq!(show(&ip, "(car nil)"), "nil");
	assert_eq!(show(&ip, "(cdr nil)"), "nil");
	assert_eq!(show(&ip, "(cons 1 2)"), "(1 2)");
}

#[test]
fn binding_rules() {
	let ip = Interpreter::new();
	assert_eq!(eval(&ip, "(set! unbound 1)").unwrap_err(), KelpError::UndefinedVariable { name: "unbound".into() });
	assert_eq!(show(&ip, "(define a 1) (define a 2) a"), "2");
}

#[test]
fn print_order_follows_arguments() {
	let ip = with_prelude();
	eval(&ip, "(list (print 1) (print \"two\") (print 'three))").unwrap();
	assert_eq!(ip.output(), "1\n\"two\"\nthree\n");
}

#[test]
fn errors_stop_a_source_unit() {
	let ip = Interpreter::new();
	assert!(ip.run_source("(define a 1) (car 1) (define b 2)").is_err());
	assert!(ip.global().exists("a"));
	assert!(!ip.global().exists("b"));
	assert_eq!(ip.run_source("(a").unwrap_err(), KelpError::UnexpectedEof);
}

#[test]
fn error_messages() {
	let ip = Interpreter::new();
	let message = |text: &str| eval(&ip, text).unwrap_err().to_string();
	assert_eq!(message("missing"), "`missing` isn't defined");
	assert_eq!(message("(if 1)"), "if: expected 2 to 3 arguments, got 1");
	assert_eq!(message("(count 1)"), "count: argument 0 is a number, expected list or string");
	assert_eq!(message("(char \"a\" 0.0)"), "char: argument 1 is a float number, expected integer");
	assert_eq!(message(",a"), "`unquote` can't be used here");
	assert_eq!(message("(define v 1) (v)"), "`v` isn't callable");
	assert_eq!(message("(a\n b))"), "unexpected `)` at 2:4");
}

#[test]
fn prelude_forms() {
	let ip = with_prelude();
	assert_eq!(show(&ip, "(defun sq (x) (* x x)) (sq 6)"), "36");
	assert_eq!(show(&ip, "(defmacro unless (c body) `(if ,c nil ,body)) (unless nil 'ran)"), "ran");
	assert_eq!(show(&ip, "(not nil)"), "t");
	assert_eq!(show(&ip, "(not 1)"), "nil");
	assert_eq!(show(&ip, "(and t 2)"), "2");
	assert_eq!(show(&ip, "(and nil undefined)"), "nil");
	assert_eq!(show(&ip, "(or nil 3)"), "3");
	assert_eq!(show(&ip, "(or 1 undefined)"), "t");
	assert_eq!(show(&ip, "(inc 1)"), "2");
	assert_eq!(show(&ip, "(dec 1.5)"), "0.5");
	assert_eq!(show(&ip, "(zero? 0)"), "t");
}

#[test]
fn prelude_lists() {
	let ip = with_prelude();
	assert_eq!(show(&ip, "(map (lambda (x) (* x 10)) '(1 2 3))"), "(10 20 30)");
	assert_eq!(show(&ip, "(map 'car '((1 2) (3 4)))"), "(1 3)");
	assert_eq!(show(&ip, "(map inc nil)"), "nil");
	assert_eq!(show(&ip, "(filter (lambda (x) (> x 1)) '(0 1 2 3))"), "(2 3)");
	assert_eq!(show(&ip, "(reduce '+ 0 '(1 2 3 4))"), "10");
	assert_eq!(show(&ip, "(length '(a b c))"), "3");
	assert_eq!(show(&ip, "(nth 1 '(a b c))"), "b");
	assert_eq!(show(&ip, "(nth 5 '(a b c))"), "nil");
	assert_eq!(show(&ip, "(last '(a b c))"), "c");
	assert_eq!(show(&ip, "(reverse '(1 2 3))"), "(3 2 1)");
	assert_eq!(show(&ip, "(append '(1) '(2 3))"), "(1 2 3)");
}
