// SPDX-License-Identifier: PMPL-1.0-or-later

//! Robinson unification with occurs check.
//!
//! Unification operates on two terms under a current environment and
//! returns either an extended environment or `None`. Failure is a normal
//! negative answer, not an error.

use crate::clause::Fact;
use crate::term::{Bindings, Term};

/// Unify two terms under `env`, returning the extended environment on
/// success.
pub fn unify(a: &Term, b: &Term, env: &Bindings) -> Option<Bindings> {
    let left = env.walk(a).clone();
    let right = env.walk(b).clone();

    match (left, right) {
        (Term::Var(x), Term::Var(y)) if x == y => Some(env.clone()),
        (Term::Var(x), term) | (term, Term::Var(x)) => bind(x, term, env),
        (Term::Atom(x), Term::Atom(y)) => (x == y).then(|| env.clone()),
        (Term::Number(x), Term::Number(y)) => (x == y).then(|| env.clone()),
        (Term::Compound(f, xs), Term::Compound(g, ys)) => {
            if f != g || xs.len() != ys.len() {
                return None;
            }
            let mut env = env.clone();
            for (x, y) in xs.iter().zip(ys.iter()) {
                env = unify(x, y, &env)?;
            }
            Some(env)
        }
        (Term::Nil, Term::Nil) => Some(env.clone()),
        (Term::Cons(h1, t1), Term::Cons(h2, t2)) => {
            let env = unify(&h1, &h2, env)?;
            unify(&t1, &t2, &env)
        }
        _ => None,
    }
}

/// Bind an unbound variable to a term after the occurs check.
fn bind(name: String, term: Term, env: &Bindings) -> Option<Bindings> {
    if occurs(&name, &term, env) {
        return None;
    }
    let mut next = env.clone();
    next.bind(name, term);
    Some(next)
}

/// True if the variable occurs anywhere inside the term, walking bound
/// variables along the way. Guarantees finite, acyclic substitutions.
pub fn occurs(name: &str, term: &Term, env: &Bindings) -> bool {
    match env.walk(term) {
        Term::Var(other) => other == name,
        Term::Compound(_, args) => args.iter().any(|arg| occurs(name, arg, env)),
        Term::Cons(head, tail) => occurs(name, head, env) || occurs(name, tail, env),
        Term::Atom(_) | Term::Number(_) | Term::Nil => false,
    }
}

/// Unify a goal with a stored fact: predicates and arities must match,
/// then arguments unify pairwise left-to-right.
pub fn unify_facts(goal: &Fact, fact: &Fact, env: &Bindings) -> Option<Bindings> {
    if goal.predicate != fact.predicate || goal.arity() != fact.arity() {
        return None;
    }
    let mut env = env.clone();
    for (a, b) in goal.args.iter().zip(fact.args.iter()) {
        env = unify(a, b, &env)?;
    }
    Some(env)
}
