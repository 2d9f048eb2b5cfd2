// src/services/balance.rs

//! Round-robin ordering by publisher.

use std::collections::{HashMap, VecDeque};

use crate::models::{AnnotatedItem, NewsItem};

/// Anything attributed to a publisher.
pub trait Sourced {
    fn source(&self) -> &str;
}

impl Sourced for NewsItem {
    fn source(&self) -> &str {
        &self.source
    }
}

impl Sourced for AnnotatedItem {
    fn source(&self) -> &str {
        &self.item.source
    }
}

impl<T: Sourced + ?Sized> Sourced for &T {
    fn source(&self) -> &str {
        (**self).source()
    }
}

/// Interleave items so consecutive entries alternate between publishers.
///
/// Groups are visited in the order their publisher first appears, and each
/// group keeps its internal order. Sources `A A A B B` come out as
/// `A B A B A`.
pub fn balance_by_source<T: Sourced>(items: Vec<T>) -> Vec<T> {
    let total = items.len();
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, VecDeque<T>> = HashMap::new();

    for item in items {
        let key = item.source().to_string();
        if !groups.contains_key(&key) {
            order.push(key.clone());
        }
        groups.entry(key).or_default().push_back(item);
    }

    let mut queues: Vec<VecDeque<T>> = order
        .iter()
        .filter_map(|key| groups.remove(key))
        .collect();

    let mut balanced = Vec::with_capacity(total);
    while balanced.len() < total {
        for queue in &mut queues {
            if let Some(item) = queue.pop_front() {
                balanced.push(item);
            }
        }
    }
    balanced
}
