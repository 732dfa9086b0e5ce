//! 成绩聚合
//!
//! 纯函数，输入为刚从存储中查询出的记录，输出直接供图表和表格使用。

use std::collections::HashMap;

use crate::models::courses::entities::Course;
use crate::models::grades::entities::{Grade, GradeDetail, GradeLetter};
use crate::models::grades::responses::{
    CourseAverage, GradeDistribution, ProgressPoint, ReportStats, StudentAverage,
};
use crate::models::students::entities::Student;

/// 五档等级分布
pub fn grade_distribution<I>(scores: I) -> GradeDistribution
where
    I: IntoIterator<Item = f64>,
{
    let mut dist = GradeDistribution::default();
    for score in scores {
        match GradeLetter::from_score(score) {
            GradeLetter::A => dist.a += 1,
            GradeLetter::B => dist.b += 1,
            GradeLetter::C => dist.c += 1,
            GradeLetter::D => dist.d += 1,
            GradeLetter::F => dist.f += 1,
        }
    }
    dist
}

/// 报表统计：数量、平均分、最高分、最低分
///
/// 空集合的平均分为 0，最高/最低分为 None。
pub fn summarize_scores(scores: &[f64]) -> ReportStats {
    if scores.is_empty() {
        return ReportStats {
            count: 0,
            average: 0.0,
            highest: None,
            lowest: None,
        };
    }

    let total: f64 = scores.iter().sum();
    ReportStats {
        count: scores.len() as i64,
        average: total / scores.len() as f64,
        highest: scores.iter().copied().reduce(f64::max),
        lowest: scores.iter().copied().reduce(f64::min),
    }
}

fn mean(sum: f64, count: u32) -> f64 {
    if count == 0 { 0.0 } else { sum / count as f64 }
}

/// 各课程平均分，只包含至少有一条成绩的课程，按课程名排序
pub fn course_averages(grades: &[GradeDetail], courses: &[Course]) -> Vec<CourseAverage> {
    let mut totals: HashMap<i64, (f64, u32)> = HashMap::new();
    for grade in grades {
        let entry = totals.entry(grade.course_id).or_default();
        entry.0 += grade.score;
        entry.1 += 1;
    }

    let mut averages: Vec<CourseAverage> = courses
        .iter()
        .filter_map(|course| {
            totals.get(&course.id).map(|&(sum, count)| CourseAverage {
                course_id: course.id,
                name: course.name.clone(),
                average_score: mean(sum, count),
            })
        })
        .collect();

    averages.sort_by(|a, b| a.name.cmp(&b.name).then(a.course_id.cmp(&b.course_id)));
    averages
}

/// 各学生平均分，只包含至少有一条成绩的学生，按姓、名排序
pub fn student_averages(grades: &[GradeDetail], students: &[Student]) -> Vec<StudentAverage> {
    let mut totals: HashMap<i64, (f64, u32)> = HashMap::new();
    for grade in grades {
        let entry = totals.entry(grade.student_id).or_default();
        entry.0 += grade.score;
        entry.1 += 1;
    }

    let mut averages: Vec<StudentAverage> = students
        .iter()
        .filter_map(|student| {
            totals.get(&student.id).map(|&(sum, count)| StudentAverage {
                student_id: student.id,
                first_name: student.first_name.clone(),
                last_name: student.last_name.clone(),
                average_score: mean(sum, count),
            })
        })
        .collect();

    averages.sort_by(|a, b| {
        a.last_name
            .cmp(&b.last_name)
            .then_with(|| a.first_name.cmp(&b.first_name))
            .then(a.student_id.cmp(&b.student_id))
    });
    averages
}

/// 单个 (学生, 课程) 的分数进度，按时间从早到晚
///
/// 每对只存一条成绩，因此序列长度不超过 1。
pub fn progress_series(history: &[Grade]) -> Vec<ProgressPoint> {
    let mut points: Vec<&Grade> = history.iter().collect();
    points.sort_by_key(|g| g.date);
    points
        .into_iter()
        .map(|g| ProgressPoint {
            date: g.date.date_naive(),
            score: g.score,
        })
        .collect()
}
