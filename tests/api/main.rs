// a single test binary: each tests/*.rs file would be linked separately, and
// linking is sequential
mod end_to_end;
mod health_check;
mod helpers;
