use super::*;
use crate::score::SimpleScore;

#[derive(Clone, Debug)]
struct Schedule {
    rooms: Vec<Option<i32>>,
    slots: Vec<Option<i32>>,
    score: Option<SimpleScore>,
}

impl PlanningSolution for Schedule {
    type Score = SimpleScore;

    fn score(&self) -> Option<Self::Score> {
        self.score
    }

    fn set_score(&mut self, score: Option<Self::Score>) {
        self.score = score;
    }
}

fn schedule() -> Schedule {
    Schedule {
        rooms: vec![None, None, None],
        slots: vec![None, None, None],
        score: None,
    }
}

fn get_room(s: &Schedule, i: usize) -> Option<i32> {
    s.rooms.get(i).copied().flatten()
}

fn set_room(s: &mut Schedule, i: usize, v: Option<i32>) {
    if let Some(slot) = s.rooms.get_mut(i) {
        *slot = v;
    }
}

fn room_variable() -> TypedVariableDescriptor<Schedule, i32> {
    TypedVariableDescriptor::new("room", vec![10, 20, 30], get_room, set_room)
}

#[test]
fn typed_variable_assign_and_read_back() {
    let var = room_variable();
    let mut s = schedule();

    assert_eq!(var.assigned_index(&s, 1), None);
    var.assign(&mut s, 1, Some(2));
    assert_eq!(s.rooms[1], Some(30));
    assert_eq!(var.assigned_index(&s, 1), Some(2));

    var.assign(&mut s, 1, None);
    assert_eq!(s.rooms[1], None);
    assert_eq!(var.assigned_index(&s, 1), None);
}

#[test]
fn typed_variable_shared_range_is_entity_independent() {
    let var = room_variable();
    let s = schedule();
    assert!(var.is_entity_independent_range());
    assert_eq!(var.value_count(&s, 0), 3);
    assert_eq!(var.value_count(&s, 2), 3);
}

#[test]
fn typed_variable_per_entity_range() {
    fn slot_range(_s: &Schedule, entity_index: usize) -> Vec<i32> {
        (0..entity_index as i32 + 1).collect()
    }
    fn get_slot(s: &Schedule, i: usize) -> Option<i32> {
        s.slots.get(i).copied().flatten()
    }
    fn set_slot(s: &mut Schedule, i: usize, v: Option<i32>) {
        if let Some(slot) = s.slots.get_mut(i) {
            *slot = v;
        }
    }

    let var: TypedVariableDescriptor<Schedule, i32> =
        TypedVariableDescriptor::per_entity("slot", slot_range, get_slot, set_slot);
    let mut s = schedule();

    assert!(!var.is_entity_independent_range());
    assert_eq!(var.value_count(&s, 0), 1);
    assert_eq!(var.value_count(&s, 2), 3);

    var.assign(&mut s, 2, Some(1));
    assert_eq!(s.slots[2], Some(1));
    assert_eq!(var.assigned_index(&s, 2), Some(1));
}

#[test]
fn strength_order_sorts_increasing() {
    fn strength(v: &i32) -> i64 {
        // Prefer small room numbers last
        -(*v as i64)
    }
    let var = room_variable().with_strength(strength);
    let s = schedule();
    assert!(var.has_strength());
    // values [10, 20, 30] with strength [-10, -20, -30] => increasing: 30, 20, 10
    assert_eq!(var.strength_order(&s, 0), vec![2, 1, 0]);
}

#[test]
fn strength_order_identity_without_strength() {
    let var = room_variable();
    let s = schedule();
    assert!(!var.has_strength());
    assert_eq!(var.strength_order(&s, 0), vec![0, 1, 2]);
}

fn entity_count(s: &Schedule) -> usize {
    s.rooms.len()
}

#[test]
fn entity_descriptor_counts_and_variables() {
    let desc = EntityDescriptor::new("Lecture", entity_count)
        .with_variable(Box::new(room_variable()));
    let s = schedule();
    assert_eq!(desc.entity_count(&s), 3);
    assert_eq!(desc.variables().len(), 1);
    assert_eq!(desc.variable(0).name(), "room");
}

#[test]
fn solution_descriptor_deduces_single_entity() {
    let desc = SolutionDescriptor::new(vec![EntityDescriptor::new("Lecture", entity_count)]);
    assert_eq!(desc.deduce_entity_descriptor_index().unwrap(), 0);
}

#[test]
fn solution_descriptor_rejects_ambiguous_deduction() {
    let desc = SolutionDescriptor::new(vec![
        EntityDescriptor::new("Lecture", entity_count),
        EntityDescriptor::new("Exam", entity_count),
    ]);
    let err = desc.deduce_entity_descriptor_index().unwrap_err();
    assert!(matches!(err, crate::error::SolverError::Config(_)));
}
