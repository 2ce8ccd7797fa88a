//! 2023 day 1: calibration values from first and last digits.

use anyhow::{Result, anyhow};

const WORDS: [&str; 9] = [
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

fn digit_at(line: &str, index: usize, spelled: bool) -> Option<u32> {
    let rest = &line[index..];
    if let Some(digit) = rest.chars().next().and_then(|ch| ch.to_digit(10)) {
        return Some(digit);
    }
    if !spelled {
        return None;
    }
    WORDS
        .iter()
        .position(|word| rest.starts_with(word))
        .map(|position| position as u32 + 1)
}

fn calibration(line: &str, spelled: bool) -> Result<u32> {
    let mut digits = line
        .char_indices()
        .filter_map(|(index, _)| digit_at(line, index, spelled));
    let first = digits
        .next()
        .ok_or_else(|| anyhow!("no digit in line {line:?}"))?;
    let last = digits.last().unwrap_or(first);
    Ok(first * 10 + last)
}

fn total(input: &[String], spelled: bool) -> Result<u32> {
    input
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| calibration(line, spelled))
        .sum()
}

pub fn part1(input: &[String]) -> Result<u32> {
    total(input, false)
}

pub fn part2(input: &[String]) -> Result<u32> {
    total(input, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn primary_example() {
        let input = lines(&["1abc2", "pqr3stu8vwx", "a1b2c3d4e5f", "treb7uchet"]);
        assert_eq!(part1(&input).expect("part1"), 142);
    }

    #[test]
    fn secondary_example() {
        let input = lines(&[
            "two1nine",
            "eightwothree",
            "abcone2threexyz",
            "xtwone3four",
            "4nineeightseven2",
            "zoneight234",
            "7pqrstsixteen",
        ]);
        assert_eq!(part2(&input).expect("part2"), 281);
    }

    #[test]
    fn overlapping_words_count_from_both_ends() {
        assert_eq!(part2(&lines(&["oneight"])).expect("part2"), 18);
    }

    #[test]
    fn line_without_digits_is_an_error() {
        assert!(part1(&lines(&["abc"])).is_err());
    }
}
