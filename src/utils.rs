/// join words into `a, b or c` (`and` instead of `or` when `all` is set)
pub fn format_list(items: &[String], all: bool) -> String {
	match items {
		[] => "nothing".to_string(),
		[one] => one.clone(),
		[rest @ .., last] => format!("{} {} {}", rest.join(", "), if all {"and"} else {"or"}, last),
	}
}

/// describe an inclusive argument count range, `max` of `None` meaning unbounded
pub fn format_arg_range(min: usize, max: Option<usize>) -> String {
	match max {
		Some(max) => if min == max {
			format!("{} argument{}", min, if min == 1 {""} else {"s"})
		} else if min == 0 {
			format!("at most {} argument{}", max, if max == 1 {""} else {"s"})
		} else {
			format!("{} to {} arguments", min, max)
		},
		None => if min == 0 {
			"any number of arguments".to_string()
		} else {
			format!("at least {} argument{}", min, if min == 1 {""} else {"s"})
		},
	}
}
